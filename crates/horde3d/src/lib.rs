//! Safe bindings for the Horde3D engine
//!
//! Wraps the raw tables of `horde3d_sys` with:
//! - [`Engine`] - load, init and release, plus every engine operation
//! - [`Resource`] / [`Node`] - typed handles
//! - typed enums and flags in [`types`]
//! - owned strings in both directions; engine owned buffers are copied and
//!   library allocated buffers are freed with the library's allocator

mod engine;
mod error;
mod ffi;
mod handle;
mod resource;
mod scene;
pub mod types;
mod utils;

pub use engine::{Engine, LibraryPaths, Message};
pub use error::{GeometryError, HordeError, Result};
pub use handle::{Node, Resource};
pub use resource::{MappedStream, RenderTargetData};
pub use scene::{Aabb, MeshBatch, NodeMatrices, RayHit, Transform};
pub use types::*;
pub use utils::{GeometryData, PickRay};

/// Raw ABI, for callers that need to fake or extend the function tables
pub use horde3d_sys as sys;
