use drvscope_core::{dispatch::CompleteRequest, DriverResult};

use crate::{
    kapi::DriverErrorEx,
    kdef::{IoCompleteRequest, IO_PRIORITY::IO_NO_INCREMENT, IO_STACK_LOCATION, IRP, NTSTATUS},
};

pub trait IrpEx {
    fn complete_request(&mut self, status: NTSTATUS, information: usize) -> NTSTATUS;

    /// Returns a pointer to the caller's stack location in the given `IRP`.
    fn current_stack_location(&self) -> &IO_STACK_LOCATION;
}

impl IrpEx for IRP {
    fn complete_request(&mut self, status: NTSTATUS, information: usize) -> NTSTATUS {
        self.IoStatus.Status = status;
        self.IoStatus.Information = information;
        unsafe { IoCompleteRequest(self, IO_NO_INCREMENT) };
        status
    }

    fn current_stack_location(&self) -> &IO_STACK_LOCATION {
        unsafe { &*self.Overlay.CurrentStackLocation }
    }
}

/// Hands an IRP back to the I/O manager. Taken by value, so every IRP
/// is completed exactly once.
pub struct IrpCompletion<'a> {
    irp: &'a mut IRP,
}

impl<'a> IrpCompletion<'a> {
    pub fn new(irp: &'a mut IRP) -> Self {
        Self { irp }
    }
}

impl CompleteRequest for IrpCompletion<'_> {
    type Status = NTSTATUS;

    fn complete(self, result: DriverResult<usize>) -> NTSTATUS {
        let information = result.unwrap_or(0);
        self.irp.complete_request(result.to_ntstatus(), information)
    }
}
