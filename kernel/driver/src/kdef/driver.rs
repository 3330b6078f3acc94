//! Driver Object.

use super::{DEVICE_OBJECT, IRP, NTSTATUS, PDRIVER_DISPATCH, UNICODE_STRING};

pub type PDRIVER_INITIALIZE = Option<extern "system" fn (_self: &mut DRIVER_OBJECT, &UNICODE_STRING) -> NTSTATUS>;
pub type PDRIVER_STARTIO = Option<extern "system" fn (_self: &mut DRIVER_OBJECT, &IRP)>;
pub type PDRIVER_UNLOAD = Option<extern "system" fn (_self: &mut DRIVER_OBJECT)>;

/// Number of entries in `DRIVER_OBJECT::MajorFunction` (`IRP_MJ_MAXIMUM_FUNCTION + 1`).
pub const IRP_MJ_FUNCTION_COUNT: usize = 28;

/// Represents the image of a loaded kernel-mode driver.
#[repr(C)]
pub struct DRIVER_OBJECT
{
	pub Type: u16,
	pub Size: u16,
	pub DeviceObject: *mut DEVICE_OBJECT,
	pub Flags: u32,
	pub DriverStart: *const u8,
	pub DriverSize: u32,
	/// Loader entry of the image, a `KLDR_DATA_TABLE_ENTRY`.
	pub DriverSection: *const KLDR_DATA_TABLE_ENTRY,
	pub DriverExtension: *mut u8,
	pub DriverName: UNICODE_STRING,
	pub HardwareDatabase: *const UNICODE_STRING,
	pub FastIoDispatch: *mut u8,
	pub DriverInit: PDRIVER_INITIALIZE,
	pub DriverStartIo: PDRIVER_STARTIO,
	/// The entry point for the driver's Unload routine, if any.
	pub DriverUnload: PDRIVER_UNLOAD,
	/// A dispatch table consisting of an array of entry points for the driver's `DispatchXxx` routines.
	pub MajorFunction: [PDRIVER_DISPATCH; IRP_MJ_FUNCTION_COUNT],
}

/// Kernel loader entry, as linked into `PsLoadedModuleList`.
///
/// Only the leading, long stable part of the structure is declared.
#[repr(C)]
pub struct KLDR_DATA_TABLE_ENTRY
{
	pub InLoadOrderLinks: super::_LIST_ENTRY,
	pub ExceptionTable: *const u8,
	pub ExceptionTableSize: u32,
	pub GpValue: *const u8,
	pub NonPagedDebugInfo: *const u8,
	pub DllBase: *const u8,
	pub EntryPoint: *const u8,
	pub SizeOfImage: u32,
	pub FullDllName: UNICODE_STRING,
	pub BaseDllName: UNICODE_STRING,
}

#[cfg(target_arch = "x86_64")]
const _: () = {
	assert!(core::mem::offset_of!(DRIVER_OBJECT, DriverSection) == 0x28);
	assert!(core::mem::offset_of!(DRIVER_OBJECT, MajorFunction) == 0x70);
	assert!(core::mem::offset_of!(KLDR_DATA_TABLE_ENTRY, DllBase) == 0x30);
	assert!(core::mem::offset_of!(KLDR_DATA_TABLE_ENTRY, BaseDllName) == 0x58);
};
