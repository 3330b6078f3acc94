//! Event Objects.

use super::DISPATCHER_HEADER;

/// Event object.
#[repr(C)]
pub struct KEVENT
{
	Header: DISPATCHER_HEADER,
}
