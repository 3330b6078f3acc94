//! Kernel Objects.

use super::{
    _LIST_ENTRY, KSPIN_LOCK,
    DEVICE_OBJECT, KPROCESSOR_MODE, KWAIT_REASON, NTSTATUS, PCVOID, PVOID, UNICODE_STRING,
};

pub type _OBJECT_TYPE = ();
pub type POBJECT_TYPE = *const _OBJECT_TYPE;

/// Opaque `FILE_OBJECT`, we never look inside.
pub type FILE_OBJECT = ();
pub type PFILE_OBJECT = *mut FILE_OBJECT;

extern "system" {
	pub static IoDriverObjectType: *const POBJECT_TYPE;
	pub static IoFileObjectType: *const POBJECT_TYPE;
	pub static PsProcessType: *const POBJECT_TYPE;

	/// Undocumented but exported: reference an object by its namespace path.
	pub fn ObReferenceObjectByName(
		ObjectName: *const UNICODE_STRING,
		Attributes: u32,
		AccessState: PVOID,
		DesiredAccess: u32,
		ObjectType: POBJECT_TYPE,
		AccessMode: KPROCESSOR_MODE,
		ParseContext: PVOID,
		Object: *mut PVOID,
	) -> NTSTATUS;

	/// `ObDereferenceObject` is a macro for this routine.
	pub fn ObfDereferenceObject(Object: PCVOID) -> isize;

	pub fn IoGetDeviceObjectPointer(
		ObjectName: *const UNICODE_STRING,
		DesiredAccess: u32,
		FileObject: *mut PFILE_OBJECT,
		DeviceObject: *mut *mut DEVICE_OBJECT,
	) -> NTSTATUS;

	pub fn KeWaitForSingleObject(
		Object: PCVOID,
		WaitReason: KWAIT_REASON,
		WaitMode: KPROCESSOR_MODE,
		Alertable: bool,
		Timeout: Option<&i64>,
	) -> NTSTATUS;
}

/// Device queue object.
#[repr(C)]
pub struct KDEVICE_QUEUE
{
	Type: u16,
	Size: u16,
	DeviceListHead: _LIST_ENTRY,
	Lock: KSPIN_LOCK,
	Busy: bool,
}
