//! Raw Horde3D ABI
//!
//! This crate mirrors the C interface of the Horde3D core library and the
//! Horde3DUtils helper library. It performs no marshaling of its own:
//!
//! - [`H3DRes`] / [`H3DNode`] - opaque handles minted by the engine
//! - [`constants`] - numeric values of every engine enumeration
//! - [`Horde3DApi`] - function table for `libHorde3D`
//! - [`Horde3DUtilsApi`] - function table for `libHorde3DUtils`
//!
//! The tables are resolved at runtime with `libloading`, so nothing links
//! against the engine at build time. Use the `horde3d` crate for a safe API.

#[macro_use]
mod table;

pub mod constants;
mod engine;
mod utils;

use std::os::raw::c_int;

pub use engine::Horde3DApi;
pub use utils::Horde3DUtilsApi;
pub use table::{library_file_name, open_library, LoadError};

/// Handle to a resource (0 is invalid)
pub type H3DRes = c_int;

/// Handle to a scene node (0 is invalid)
pub type H3DNode = c_int;

/// Scene root node handle
pub const H3D_ROOT_NODE: H3DNode = 1;

/// Base name of the core library (`libHorde3D.so`, `Horde3D.dll`, ...)
pub const CORE_LIBRARY_NAME: &str = "Horde3D";

/// Base name of the utility library
pub const UTILS_LIBRARY_NAME: &str = "Horde3DUtils";
