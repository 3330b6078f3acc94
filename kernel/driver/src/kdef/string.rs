/// A counted Unicode string.
#[repr(C)]
pub struct UNICODE_STRING {
	/// The length in **bytes** of the string stored in `Buffer`.
	pub Length: u16,
	/// The length in **bytes** of `Buffer`.
	pub MaximumLength: u16,
	/// Pointer to a buffer used to contain a string of wide characters.
	pub Buffer: *const u16,
}

pub type PUNICODE_STRING = *mut UNICODE_STRING;
pub type PCUNICODE_STRING = *const UNICODE_STRING;
