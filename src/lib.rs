//! Horde3D sample applications
//!
//! Shared pieces of the `knight` binary and the `static_scene` demo:
//! configuration, logging, input mapping, window and engine systems and the
//! scene setups.

pub mod config;
pub mod input;
pub mod logging;
pub mod scene;
pub mod systems;
