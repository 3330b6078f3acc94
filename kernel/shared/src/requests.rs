use crate::ProcessStatus;

pub const FILE_DEVICE_UNKNOWN: u32 = 0x00000022;
pub const METHOD_BUFFERED: u32 = 0x00000000;
pub const FILE_ANY_ACCESS: u32 = 0x00000000;

/// Equivalent of the `CTL_CODE` macro.
pub const fn ctl_code(device_type: u32, function: u32, method: u32, access: u32) -> u32 {
    (device_type << 16) | (access << 14) | (function << 2) | method
}

/// A request understood by the driver's control handler.
///
/// Implementors are plain `#[repr(C)]` data: the driver copies exactly
/// `size_of::<Self>()` bytes out of the request buffer into a value of this type.
pub trait DriverRequest: Sized + Copy {
    type Result: Sized + Copy + Default;

    fn control_code() -> u32 {
        ctl_code(
            FILE_DEVICE_UNKNOWN,
            Self::function_code() as u32 & 0xFFF,
            METHOD_BUFFERED,
            FILE_ANY_ACCESS,
        )
    }

    /// The 12 bit function code for the request.
    /// Codes below 0x800 are reserved by Microsoft.
    fn function_code() -> u16;
}

/// Sample request carrying a single value which the driver logs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestExample {
    pub value: i32,
}

/// The example request has no response payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExample;

impl DriverRequest for RequestExample {
    type Result = ResponseExample;

    fn function_code() -> u16 {
        0x800
    }
}

/// Query whether a process has terminated.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestProcessStatus {
    pub process_id: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseProcessStatus {
    pub status: ProcessStatus,
}

impl DriverRequest for RequestProcessStatus {
    type Result = ResponseProcessStatus;

    fn function_code() -> u16 {
        0x801
    }
}
