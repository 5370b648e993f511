//! Input handling for Horde3D sample applications
//!
//! Free-fly camera control, per-frame key states and animation blend control.

mod blend;
mod free_fly;
mod key_states;

pub use blend::BlendControl;
pub use free_fly::{CameraControl, FreeFlyCamera, FreeFlyController};
pub use key_states::KeyStates;
