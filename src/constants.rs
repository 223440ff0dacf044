// Web shell defaults. Anything the host tests exercise lives in
// `core::constants`; these only matter in the browser.

// DOM
pub const CONTAINER_ID: &str = "container"; // element the canvas is appended to
pub const MODEL_URL_ATTRIBUTE: &str = "data-model"; // optional override on the container
pub const DEFAULT_MODEL_URL: &str = "./couldron.glb";

// Surface
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0]; // transparent black
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
