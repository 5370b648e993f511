//! String and length marshaling shared by the wrapper modules

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

use crate::error::{HordeError, Result};

/// NUL terminated copy of `value`, owned by the caller for the duration of a call
pub(crate) fn c_string(value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| HordeError::InvalidString(value.to_owned()))
}

/// Copies an engine owned string. The engine keeps ownership of `ptr`, which is
/// only valid until the next call that returns a string.
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated string.
pub(crate) unsafe fn copy_engine_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Element count as the engine's 32 bit size type
pub(crate) fn c_len(len: usize) -> Result<c_int> {
    c_int::try_from(len).map_err(|_| HordeError::BufferTooLarge { len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_nul_is_rejected() {
        let err = c_string("bad\0name").unwrap_err();
        assert!(matches!(err, HordeError::InvalidString(s) if s == "bad\0name"));
    }

    #[test]
    fn test_null_pointer_copies_empty() {
        assert_eq!(unsafe { copy_engine_string(std::ptr::null()) }, "");
    }

    #[test]
    fn test_copy_is_independent() {
        let owned = CString::new("Horde3D 1.0.0").unwrap();
        let copied = unsafe { copy_engine_string(owned.as_ptr()) };
        drop(owned);
        assert_eq!(copied, "Horde3D 1.0.0");
    }

    #[test]
    fn test_len_limit() {
        assert_eq!(c_len(16).unwrap(), 16);
        assert!(matches!(
            c_len(usize::MAX),
            Err(HordeError::BufferTooLarge { len: usize::MAX })
        ));
    }
}
