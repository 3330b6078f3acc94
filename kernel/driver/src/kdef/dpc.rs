//! Deferred Procedure Calls (DPC).

use super::_LIST_ENTRY;

pub type PDEFERRED_ROUTINE = extern "system" fn (Dpc: *const KDPC, DeferredContext: *mut u8, SystemArgument1: *const u8, SystemArgument2: *const u8);

/// Deferred Procedure Call object.
#[repr(C)]
pub struct KDPC
{
	Type: u8,
	Number: u8,
	Importance: u8,

	DpcListEntry: _LIST_ENTRY,
	DeferredRoutine: Option<PDEFERRED_ROUTINE>,
	DeferredContext: *mut u8,
	SystemArgument1: *mut u8,
	SystemArgument2: *mut u8,

	DpcData: *mut u8,
}
