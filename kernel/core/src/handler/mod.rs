use alloc::{boxed::Box, vec::Vec};
use core::mem::size_of;

use drvscope_shared::requests::{DriverRequest, RequestExample, RequestProcessStatus};

use crate::{DriverError, DriverResult};

mod example;
pub use example::*;

mod process;
pub use process::*;

type RequestHandlerGeneric = dyn Fn(&[u8], &mut [u8]) -> DriverResult<usize> + Send + Sync;
struct HandlerInfo {
    control_code: u32,
    handler: Box<RequestHandlerGeneric>,
    input_buffer_size: usize,
    output_buffer_size: usize,
}

/// Request handler registry for handling device control requests.
pub struct HandlerRegistry {
    handlers: Vec<HandlerInfo>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registry with every request the driver understands.
    pub fn with_default_handlers<P: ProcessTable + 'static>(processes: P) -> Self {
        let mut registry = Self::new();
        registry.register::<RequestExample, _>(handler_example);
        registry.register::<RequestProcessStatus, _>(move |req, res| {
            handler_process_status(&processes, req, res)
        });
        registry
    }

    /// Register a request handler. A handler registered earlier for the same
    /// control code is replaced.
    pub fn register<R, F>(&mut self, handler: F)
    where
        R: DriverRequest,
        F: Fn(&R, &mut R::Result) -> DriverResult<()> + Send + Sync + 'static,
    {
        let handler = move |inbuffer: &[u8], outbuffer: &mut [u8]| -> DriverResult<usize> {
            /* buffer sizes have been checked by HandlerRegistry::handle */
            let request = unsafe { core::ptr::read_unaligned(inbuffer.as_ptr() as *const R) };

            let mut response = R::Result::default();
            handler(&request, &mut response)?;

            unsafe {
                core::ptr::write_unaligned(outbuffer.as_mut_ptr() as *mut R::Result, response)
            };
            Ok(size_of::<R::Result>())
        };

        let info = HandlerInfo {
            control_code: R::control_code(),
            handler: Box::new(handler),
            input_buffer_size: size_of::<R>(),
            output_buffer_size: size_of::<R::Result>(),
        };

        match self
            .handlers
            .iter_mut()
            .find(|entry| entry.control_code == info.control_code)
        {
            Some(entry) => *entry = info,
            None => self.handlers.push(info),
        }
    }

    /// Dispatch a control request. Returns the number of bytes written to `outbuffer`.
    pub fn handle(
        &self,
        control_code: u32,
        inbuffer: &[u8],
        outbuffer: &mut [u8],
    ) -> DriverResult<usize> {
        let handler = match self
            .handlers
            .iter()
            .find(|entry| entry.control_code == control_code)
        {
            Some(handler) => handler,
            None => {
                log::warn!(
                    "Received IO request with invalid IOCTL (0x{:X}) from user-mode.",
                    control_code
                );
                return Err(DriverError::InvalidParameter);
            }
        };

        if handler.input_buffer_size != inbuffer.len() {
            log::warn!(
                "Received IO request with invalid length from user-mode (expected {}, received: {}).",
                handler.input_buffer_size,
                inbuffer.len()
            );
            return Err(DriverError::InvalidParameter);
        }

        if outbuffer.len() < handler.output_buffer_size {
            log::warn!(
                "outbuffer too small (expected {}, received: {})",
                handler.output_buffer_size,
                outbuffer.len()
            );
            return Err(DriverError::InvalidParameter);
        }

        (handler.handler)(inbuffer, outbuffer)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use drvscope_shared::requests::ResponseExample;

    use super::*;

    #[test]
    fn handler_is_called_with_decoded_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = HandlerRegistry::new();
        registry.register::<RequestExample, _>(move |req, _res| {
            assert_eq!(req.value, -7);
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let written = registry
            .handle(RequestExample::control_code(), &(-7i32).to_ne_bytes(), &mut [])
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wrong_length_is_rejected_before_the_handler_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = HandlerRegistry::new();
        registry.register::<RequestExample, _>(move |_req, _res| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        for input in [&[1u8, 2, 3][..], &[1u8, 2, 3, 4, 5][..], &[][..]] {
            assert_eq!(
                registry.handle(RequestExample::control_code(), input, &mut []),
                Err(DriverError::InvalidParameter)
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_code_is_invalid_parameter() {
        let registry = HandlerRegistry::with_default_handlers(crate::mock::MockProcesses::default());
        assert_eq!(
            registry.handle(0x0022_2FFC, &1i32.to_ne_bytes(), &mut []),
            Err(DriverError::InvalidParameter)
        );
    }

    #[test]
    fn handler_errors_are_passed_through() {
        let mut registry = HandlerRegistry::new();
        registry.register::<RequestExample, _>(|_req, _res: &mut ResponseExample| {
            Err(DriverError::Unsuccessful)
        });

        assert_eq!(
            registry.handle(RequestExample::control_code(), &0i32.to_ne_bytes(), &mut []),
            Err(DriverError::Unsuccessful)
        );
    }

    #[test]
    fn later_registration_replaces_earlier_one() {
        let mut registry = HandlerRegistry::new();
        registry.register::<RequestExample, _>(|_req, _res| Err(DriverError::Unsuccessful));
        registry.register::<RequestExample, _>(|_req, _res| Ok(()));

        assert_eq!(
            registry.handle(RequestExample::control_code(), &0i32.to_ne_bytes(), &mut []),
            Ok(0)
        );
    }

    #[test]
    fn short_output_buffer_is_rejected() {
        let registry = HandlerRegistry::with_default_handlers(crate::mock::MockProcesses::default());
        let mut outbuffer = [0u8; 3];
        assert_eq!(
            registry.handle(
                RequestProcessStatus::control_code(),
                &4u32.to_ne_bytes(),
                &mut outbuffer
            ),
            Err(DriverError::InvalidParameter)
        );
    }
}
