use alloc::{string::String, vec::Vec};

use drvscope_core::{DriverError, DriverResult};

use crate::kdef::UNICODE_STRING;

pub trait UnicodeStringEx {
    fn from_bytes(s: &'static [u16]) -> UNICODE_STRING;
    fn as_string_lossy(&self) -> String;
}

impl UnicodeStringEx for UNICODE_STRING {
    fn from_bytes(s: &'static [u16]) -> UNICODE_STRING {
        let len = s.len();
        let n = if len > 0 && s[len - 1] == 0 { len - 1 } else { len };

        UNICODE_STRING {
            Length: (n * 2) as u16,
            MaximumLength: (len * 2) as u16,
            Buffer: s.as_ptr() as _,
        }
    }

    fn as_string_lossy(&self) -> String {
        if self.Buffer.is_null() || self.Length == 0 {
            return String::new();
        }

        String::from_utf16_lossy(unsafe {
            core::slice::from_raw_parts(self.Buffer, (self.Length / 2) as usize)
        })
    }
}

impl<const N: usize> From<&'static [u16; N]> for UNICODE_STRING {
    fn from(value: &'static [u16; N]) -> Self {
        UNICODE_STRING::from_bytes(value.as_slice())
    }
}

/// A wide string allocated from the pool, for names only known at runtime.
pub struct OwnedUnicodeString {
    buffer: Vec<u16>,
}

impl OwnedUnicodeString {
    pub fn new(value: &str) -> DriverResult<Self> {
        let length = value.encode_utf16().count();
        if length * 2 > u16::MAX as usize {
            return Err(DriverError::InvalidParameter);
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(length)
            .map_err(|_| DriverError::AllocationFailure)?;
        buffer.extend(value.encode_utf16());
        Ok(Self { buffer })
    }

    /// Borrowing view, only valid while `self` is alive.
    pub fn as_unicode_string(&self) -> UNICODE_STRING {
        let length = (self.buffer.len() * 2) as u16;
        UNICODE_STRING {
            Length: length,
            MaximumLength: length,
            Buffer: self.buffer.as_ptr(),
        }
    }
}
