//! Debugger support.

use super::NTSTATUS;

#[allow(unused)]
extern "system" {
    pub fn KeBugCheck(code: u32) -> !;

	/// Breaks into the kernel debugger.
	pub fn DbgBreakPoint();
	/// Breaks into the kernel debugger and sends the value of `Status` to the debugger.
	pub fn DbgBreakPointWithStatus(Status: NTSTATUS);
}

extern "C" {
	/// Prints a formatted message to the kernel debugger.
	pub fn DbgPrintEx(ComponentId: u32, Level: u32, Format: *const u8, ...) -> NTSTATUS;
}

/// `DbgPrintEx` component id which is always enabled.
pub const DPFLTR_IHVDRIVER_ID: u32 = 77;

/// `DbgPrintEx` Message severity.
#[repr(C)]
pub enum DPFLTR_LEVEL {
	ERROR = 0,
	WARNING,
	TRACE,
	INFO,
}
