use drvscope_shared::{
    requests::{RequestProcessStatus, ResponseProcessStatus},
    ProcessStatus,
};

use crate::DriverResult;

/// Lookup of live processes.
pub trait ProcessTable: Send + Sync {
    /// `None` if no process with this id exists, otherwise whether the
    /// process object has been signaled (i.e. the process has exited).
    ///
    /// Implementations must not block: the check is a zero timeout wait.
    fn is_terminated(&self, process_id: u32) -> Option<bool>;
}

pub fn handler_process_status<P: ProcessTable + ?Sized>(
    processes: &P,
    req: &RequestProcessStatus,
    res: &mut ResponseProcessStatus,
) -> DriverResult<()> {
    res.status = match processes.is_terminated(req.process_id) {
        None => ProcessStatus::UnknownProcess,
        Some(true) => ProcessStatus::Terminated,
        Some(false) => ProcessStatus::Running,
    };

    log::trace!("process {} status {:?}", req.process_id, res.status);
    Ok(())
}
