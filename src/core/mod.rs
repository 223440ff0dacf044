pub mod animator;
pub mod background;
pub mod constants;
pub mod hash;
pub mod interaction;
pub mod model;
pub mod progress;
pub mod session;
pub mod tint;
pub mod viewport;

pub use animator::*;
pub use background::*;
pub use constants::*;
pub use hash::*;
pub use interaction::*;
pub use model::*;
pub use progress::*;
pub use session::*;
pub use tint::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static BACKGROUND_WGSL: &str = include_str!("../../shaders/background.wgsl");
pub static MODEL_WGSL: &str = include_str!("../../shaders/model.wgsl");
