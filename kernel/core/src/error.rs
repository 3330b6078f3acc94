use thiserror::Error;

/// Failure categories reported by the driver.
///
/// The driver crate maps each variant onto a single `NTSTATUS`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("object not found")]
    NotFound,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("request type not supported")]
    Unsupported,

    #[error("pool allocation failed")]
    AllocationFailure,

    #[error("object is in an unexpected state")]
    Unsuccessful,
}

pub type DriverResult<T> = core::result::Result<T, DriverError>;
