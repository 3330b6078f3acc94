//! Device Object.

use super::{DRIVER_OBJECT, IRP, KDEVICE_QUEUE, KDPC, KEVENT, NTSTATUS, UNICODE_STRING};

extern "system"
{
	pub fn IoCreateDevice(DriverObject: &mut DRIVER_OBJECT, DeviceExtensionSize: u32, DeviceName: *const UNICODE_STRING,
		DeviceType: u32, DeviceCharacteristics: u32, Exclusive: bool, DeviceObject: *mut*mut DEVICE_OBJECT) -> NTSTATUS;

	pub fn IoDeleteDevice(DeviceObject: &mut DEVICE_OBJECT);
	pub fn IoCreateSymbolicLink(SymbolicLinkName: &UNICODE_STRING, DeviceName: &UNICODE_STRING) -> NTSTATUS;
	pub fn IoDeleteSymbolicLink(SymbolicLinkName: &UNICODE_STRING) -> NTSTATUS;
}

pub const FILE_DEVICE_UNKNOWN: u32 = 0x00000022;
pub const FILE_DEVICE_SECURE_OPEN: u32 = 0x00000100;

/// Device object flags.
#[repr(C)]
pub enum DEVICE_FLAGS {
	NONE = 0,
	DO_VERIFY_VOLUME                = 0x00000002,
	DO_BUFFERED_IO                  = 0x00000004,
	DO_EXCLUSIVE                    = 0x00000008,
	DO_DIRECT_IO                    = 0x00000010,
	DO_MAP_IO_BUFFER                = 0x00000020,
	DO_DEVICE_HAS_NAME              = 0x00000040,
	DO_DEVICE_INITIALIZING          = 0x00000080,
}

/// The `DEVICE_OBJECT` structure is used by the operating system to represent a device object.
#[repr(C)]
pub struct DEVICE_OBJECT
{
	pub Type: u16,
	pub Size: u16,
	pub ReferenceCount: i32,
	pub DriverObject: *mut DRIVER_OBJECT,
	pub NextDevice: *mut DEVICE_OBJECT,
	pub AttachedDevice: *mut DEVICE_OBJECT,
	pub CurrentIrp: *const IRP,
	pub Timer: *mut u8,
	pub Flags: u32,
	pub Characteristics: u32,
	pub Vpb: *mut u8,
	pub DeviceExtension: *mut u8,
	pub DeviceType: u32,
	pub StackSize: u8,
	/* union of LIST_ENTRY and WAIT_CONTEXT_BLOCK */
	pub Queue: [usize; 9],
	pub AlignmentRequirement: u32,
	pub DeviceQueue: KDEVICE_QUEUE,
	pub Dpc: KDPC,
	pub ActiveThreadCount: u32,
	pub SecurityDescriptor: *const u8,
	pub DeviceLock: KEVENT,
	pub SectorSize: u16,
	pub Spare1: u16,
	pub DeviceObjectExtension: *mut u8,
	pub Reserved: *const u8,
}

#[cfg(target_arch = "x86_64")]
const _: () = {
	assert!(core::mem::offset_of!(DEVICE_OBJECT, DeviceExtension) == 0x40);
	assert!(core::mem::offset_of!(DEVICE_OBJECT, AlignmentRequirement) == 0x98);
	assert!(core::mem::offset_of!(DEVICE_OBJECT, ActiveThreadCount) == 0x108);
};

impl DEVICE_OBJECT {
	/// Return a reference to driver-defined data structure.
	///
	/// # Safety
	/// The device must have been created with an extension of at least `size_of::<T>()`
	/// bytes, holding an initialized `T`.
	pub unsafe fn extension<T>(&self) -> &T {
		&*(self.DeviceExtension as *const T)
	}
}

pub type PDEVICE_OBJECT = *mut DEVICE_OBJECT;

pub type PDRIVER_DISPATCH = Option<extern "system" fn (DeviceObject: &mut DEVICE_OBJECT, Irp: &mut IRP) -> NTSTATUS>;
