use drvscope_core::handler::ProcessTable;
use winapi::shared::ntstatus::{STATUS_SUCCESS, STATUS_TIMEOUT};

use crate::{
    kapi::NTStatusEx,
    kdef::{
        KeWaitForSingleObject, ObfDereferenceObject, PsLookupProcessByProcessId,
        KPROCESSOR_MODE, KWAIT_REASON, PEPROCESS,
    },
};

/// A referenced process object.
struct ProcessRef(PEPROCESS);

impl Drop for ProcessRef {
    fn drop(&mut self) {
        unsafe { ObfDereferenceObject(self.0) };
    }
}

fn lookup_process(process_id: u32) -> Option<ProcessRef> {
    let mut process: PEPROCESS = core::ptr::null();
    let status = unsafe { PsLookupProcessByProcessId(process_id as usize, &mut process) };
    if !status.is_ok() || process.is_null() {
        return None;
    }

    Some(ProcessRef(process))
}

/// Process lookups against the live process table.
pub struct KernelProcessTable;

impl ProcessTable for KernelProcessTable {
    fn is_terminated(&self, process_id: u32) -> Option<bool> {
        let process = lookup_process(process_id)?;

        /* a process object becomes signaled once the process exited */
        let timeout = 0i64;
        let status = unsafe {
            KeWaitForSingleObject(
                process.0,
                KWAIT_REASON::Executive,
                KPROCESSOR_MODE::KernelMode,
                false,
                Some(&timeout),
            )
        };

        match status {
            STATUS_SUCCESS => Some(true),
            STATUS_TIMEOUT => Some(false),
            status => {
                log::debug!("Wait on process {} returned 0x{:X}", process_id, status);
                Some(false)
            }
        }
    }
}
