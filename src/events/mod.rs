pub mod pointer;
pub mod resize;

pub use pointer::{wire_input_handlers, InputWiring};
pub use resize::wire_window_resize;
