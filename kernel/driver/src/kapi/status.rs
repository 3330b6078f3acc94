//! NT Status codes.

use drvscope_core::{DriverError, DriverResult};
use winapi::shared::{
    ntdef::NTSTATUS,
    ntstatus::{
        STATUS_INSUFFICIENT_RESOURCES, STATUS_INVALID_PARAMETER, STATUS_NOT_SUPPORTED,
        STATUS_OBJECT_NAME_NOT_FOUND, STATUS_SUCCESS, STATUS_UNSUCCESSFUL,
    },
};

pub trait NTStatusEx {
	/// Evaluates to `true` if the `Status` is a success type (`0..0x3FFFFFFF`)
	/// or an informational type (`0x40000000..0x7FFFFFFF`).
	fn is_ok(&self) -> bool;

	/// Status is a warning or error type.
	fn is_err(&self) -> bool;

	/// Status is a success type.
	fn is_success(&self) -> bool;

	fn ok(self) -> core::result::Result<(), NTSTATUS>;
}

impl NTStatusEx for NTSTATUS {
	fn is_ok(&self) -> bool {
		*self >= 0
	}

	fn is_err(&self) -> bool {
		*self < 0
	}

	fn is_success(&self) -> bool {
		(*self as u32) <= 0x3FFF_FFFF
	}

	fn ok(self) -> core::result::Result<(), NTSTATUS> {
		if self.is_ok() {
			Ok(())
		} else {
			Err(self)
		}
	}
}

/// Maps our error taxonomy onto the status reported to the I/O manager.
pub trait DriverErrorEx {
	fn to_ntstatus(&self) -> NTSTATUS;
}

impl DriverErrorEx for DriverError {
	fn to_ntstatus(&self) -> NTSTATUS {
		match self {
			DriverError::NotFound => STATUS_OBJECT_NAME_NOT_FOUND,
			DriverError::InvalidParameter => STATUS_INVALID_PARAMETER,
			DriverError::Unsupported => STATUS_NOT_SUPPORTED,
			DriverError::AllocationFailure => STATUS_INSUFFICIENT_RESOURCES,
			DriverError::Unsuccessful => STATUS_UNSUCCESSFUL,
		}
	}
}

impl<T> DriverErrorEx for DriverResult<T> {
	fn to_ntstatus(&self) -> NTSTATUS {
		match self {
			Ok(_) => STATUS_SUCCESS,
			Err(error) => error.to_ntstatus(),
		}
	}
}
