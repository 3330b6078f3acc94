pub use winapi::shared::ntdef::NTSTATUS;

pub type VOID = ();
pub type PVOID = *mut VOID;
pub type PCVOID = *const VOID;

/// Doubly linked list structure.
#[repr(C)]
pub struct _LIST_ENTRY {
    pub Flink: *const _LIST_ENTRY,
    pub Blink: *const _LIST_ENTRY,
}

pub type PIO_APC_ROUTINE = Option<
    extern "system" fn(ApcContext: PCVOID, IoStatusBlock: *const IO_STATUS_BLOCK, Reserved: u32),
>;

/// Spin Lock.
#[repr(C)]
#[derive(Default)]
pub struct KSPIN_LOCK {
    pub lock: usize,
}

/// Common dispatcher object header.
#[repr(C)]
pub struct DISPATCHER_HEADER {
    pub Type: u8,
    pub Absolute: u8,
    pub Size: u8,
    pub Inserted: u8,
    pub SignalState: i32,
    pub WaitListHead: _LIST_ENTRY,
}

/// An I/O status block.
#[repr(C)]
#[derive(Default, Clone, Copy)]
pub struct IO_STATUS_BLOCK {
    /// Completion status.
    pub Status: NTSTATUS,
    /// Request-dependent value.
    pub Information: usize,
}

pub type PIO_STATUS_BLOCK = *mut IO_STATUS_BLOCK;

/// Processor modes.
#[repr(u8)]
#[derive(Copy, Clone)]
pub enum KPROCESSOR_MODE {
    KernelMode,
    UserMode,
}

/// Reasons passed to the `Ke*Wait*` family.
#[repr(u32)]
#[derive(Copy, Clone)]
pub enum KWAIT_REASON {
    Executive = 0,
}

/// I/O Request priority.
pub mod IO_PRIORITY {
    /// I/O Request priority type.
    pub type KPRIORITY_BOOST = u8;

    pub const IO_NO_INCREMENT: KPRIORITY_BOOST = 0;
    pub const IO_DISK_INCREMENT: KPRIORITY_BOOST = 1;
    pub const EVENT_INCREMENT: KPRIORITY_BOOST = 1;
}

pub type KPRIORITY = IO_PRIORITY::KPRIORITY_BOOST;

/// Object attribute flags.
pub const OBJ_CASE_INSENSITIVE: u32 = 0x00000040;
pub const OBJ_KERNEL_HANDLE: u32 = 0x00000200;

/// Access mask bits used for device lookups.
pub const FILE_READ_ATTRIBUTES: u32 = 0x00000080;
