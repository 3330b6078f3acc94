use super::NTSTATUS;

pub type _KPROCESS = ();
pub type PEPROCESS = *const _KPROCESS;

extern "system" {
    /// Takes a reference on the returned process which must be released with `ObfDereferenceObject`.
    pub fn PsLookupProcessByProcessId(ProcessId: usize, Process: *mut PEPROCESS) -> NTSTATUS;
}
