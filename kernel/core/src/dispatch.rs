//! I/O control surface of the driver's own device.

use crate::{handler::HandlerRegistry, DriverError, DriverResult};

pub const IRP_MJ_CREATE: u8 = 0x00;
pub const IRP_MJ_CLOSE: u8 = 0x02;
pub const IRP_MJ_DEVICE_CONTROL: u8 = 0x0E;

/// A request as routed to us by the I/O manager.
pub enum DeviceRequest<'a> {
    Create,
    Close,
    DeviceControl {
        control_code: u32,
        input: &'a [u8],
        output: &'a mut [u8],
    },
    /// Any other major function, carrying its `IRP_MJ_*` code.
    Other(u8),
}

impl<'a> DeviceRequest<'a> {
    pub fn major_function(&self) -> u8 {
        match self {
            Self::Create => IRP_MJ_CREATE,
            Self::Close => IRP_MJ_CLOSE,
            Self::DeviceControl { .. } => IRP_MJ_DEVICE_CONTROL,
            Self::Other(major) => *major,
        }
    }
}

/// Completes the underlying request. Consumed on use, so a request can
/// only ever be completed once.
pub trait CompleteRequest {
    type Status;

    /// `Ok(n)` completes with success and `n` bytes of output,
    /// `Err(_)` completes with the mapped status and zero bytes.
    fn complete(self, result: DriverResult<usize>) -> Self::Status;
}

/// State reachable from every dispatch routine of our device.
pub struct DeviceContext {
    handlers: HandlerRegistry,
}

impl DeviceContext {
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self { handlers }
    }

    pub fn dispatch<C: CompleteRequest>(
        &self,
        request: DeviceRequest<'_>,
        completion: C,
    ) -> C::Status {
        let result = match request {
            DeviceRequest::Create => {
                log::debug!("IRP create callback");
                Ok(0)
            }
            DeviceRequest::Close => {
                log::debug!("IRP close callback");
                Ok(0)
            }
            DeviceRequest::DeviceControl {
                control_code,
                input,
                output,
            } => self.handlers.handle(control_code, input, output),
            DeviceRequest::Other(major) => {
                log::trace!("Unsupported IRP major function 0x{:X}", major);
                Err(DriverError::Unsupported)
            }
        };

        completion.complete(result)
    }
}

#[cfg(test)]
mod tests {
    use drvscope_shared::requests::{DriverRequest, RequestExample};

    use super::*;
    use crate::mock::{captured_logs, install_capture_logger, MockCompletion, MockProcesses};

    fn context() -> DeviceContext {
        install_capture_logger();
        DeviceContext::new(HandlerRegistry::with_default_handlers(
            MockProcesses::default(),
        ))
    }

    fn control(context: &DeviceContext, control_code: u32, input: &[u8]) -> MockCompletion {
        let completion = MockCompletion::default();
        context.dispatch(
            DeviceRequest::DeviceControl {
                control_code,
                input,
                output: &mut [],
            },
            completion.clone(),
        );
        completion
    }

    #[test]
    fn create_and_close_succeed_without_output() {
        let context = context();
        for request in [DeviceRequest::Create, DeviceRequest::Close] {
            let completion = MockCompletion::default();
            let status = context.dispatch(request, completion.clone());
            assert_eq!(status, Ok(0));
            assert_eq!(completion.completions(), 1);
        }
    }

    #[test]
    fn example_request_is_logged() {
        let context = context();
        let completion = control(&context, RequestExample::control_code(), &41_337i32.to_ne_bytes());

        assert_eq!(completion.result(), Some(Ok(0)));
        assert_eq!(completion.completions(), 1);
        assert!(captured_logs()
            .iter()
            .any(|line| line == "Received IO request '41337' from user-mode."));
    }

    #[test]
    fn example_request_with_wrong_length() {
        let context = context();
        for input in [&[0x11u8, 0x22, 0x33][..], &[0x11u8, 0x22, 0x33, 0x44, 0x55][..]] {
            let completion = control(&context, RequestExample::control_code(), input);
            assert_eq!(completion.result(), Some(Err(DriverError::InvalidParameter)));
            assert_eq!(completion.completions(), 1);
        }

        /* neither payload may have been parsed and logged as a value */
        let logs = captured_logs();
        assert!(!logs.iter().any(|line| line.contains("'3351057'")));
        assert!(!logs.iter().any(|line| line.contains("'1144201745'")));
    }

    #[test]
    fn unknown_control_code() {
        let context = context();
        let completion = control(&context, 0x0022_3000, &1i32.to_ne_bytes());
        assert_eq!(completion.result(), Some(Err(DriverError::InvalidParameter)));
    }

    #[test]
    fn other_major_functions_are_not_supported() {
        let context = context();
        for major in [0x03u8, 0x04, 0x12, 0x1B] {
            let completion = MockCompletion::default();
            let request = DeviceRequest::Other(major);
            assert_eq!(request.major_function(), major);

            let status = context.dispatch(request, completion.clone());
            assert_eq!(status, Err(DriverError::Unsupported));
            assert_eq!(completion.completions(), 1);
        }
    }
}
