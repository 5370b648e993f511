//! Runtime symbol tables
//!
//! `function_table!` declares a struct holding one function pointer per
//! exported symbol. Each table can be resolved from a loaded library or built
//! as a stub whose entries return zeroed values.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use libloading::Library;

/// Error raised while opening a library or resolving a symbol
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The shared library could not be opened
    #[error("failed to open library {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    /// The library does not export a required symbol
    #[error("missing symbol {name}: {source}")]
    Symbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// Platform file name for a library base name (`Horde3D` -> `libHorde3D.so`)
pub fn library_file_name(base: &str) -> OsString {
    libloading::library_filename(base)
}

/// Opens a shared library by path or file name
///
/// # Safety
/// Loading a library runs its initialization routines.
pub unsafe fn open_library(path: &Path) -> Result<Library, LoadError> {
    Library::new(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

macro_rules! function_table {
    (
        $(#[$meta:meta])*
        pub struct $table:ident {
            $(
                $field:ident = $symbol:literal :
                    fn( $( $arg:ident : $ty:ty ),* ) $( -> $ret:ty )? ;
            )*
        }
    ) => {
        $(#[$meta])*
        pub struct $table {
            $( pub $field: unsafe extern "C" fn( $( $ty ),* ) $( -> $ret )?, )*
            _library: Option<libloading::Library>,
        }

        impl $table {
            /// Resolves every entry point from `library`; the table keeps the
            /// library loaded for as long as it lives.
            ///
            /// # Safety
            /// The library must export each symbol with the declared signature.
            pub unsafe fn load(library: libloading::Library) -> Result<Self, $crate::LoadError> {
                $(
                    let $field = *library
                        .get::<unsafe extern "C" fn( $( $ty ),* ) $( -> $ret )?>(
                            concat!($symbol, "\0").as_bytes(),
                        )
                        .map_err(|source| $crate::LoadError::Symbol { name: $symbol, source })?;
                )*
                Ok(Self {
                    $( $field, )*
                    _library: Some(library),
                })
            }

            /// Table whose entries ignore their arguments and return zeroed
            /// values (0, 0.0, false, null). Individual entries can be replaced.
            pub fn stubbed() -> Self {
                $(
                    #[allow(unused_variables)]
                    extern "C" fn $field( $( $arg: $ty ),* ) $( -> $ret )? {
                        $( return unsafe { std::mem::zeroed::<$ret>() }; )?
                    }
                )*
                Self {
                    $( $field, )*
                    _library: None,
                }
            }

            /// True when the table was resolved from a real library
            pub fn is_loaded(&self) -> bool {
                self._library.is_some()
            }
        }

        impl std::fmt::Debug for $table {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($table))
                    .field("loaded", &self._library.is_some())
                    .finish_non_exhaustive()
            }
        }
    };
}
