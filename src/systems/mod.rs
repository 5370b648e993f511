//! Application systems
//!
//! Window, engine and frame timing pieces shared by the sample binaries.

mod engine;
mod frame;
mod window;

pub use engine::{apply_options, resize_viewport, EngineSystem};
pub use frame::FpsCounter;
pub use window::{fullscreen_resolution, WindowError, WindowSystem};
