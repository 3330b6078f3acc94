use alloc::format;

use crate::kdef::{DbgPrintEx, DPFLTR_IHVDRIVER_ID, DPFLTR_LEVEL};

pub struct KernelLogger;

impl log::Log for KernelLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return
        }

        let (level_prefix, log_level) = match record.level() {
            log::Level::Trace => ("T", DPFLTR_LEVEL::TRACE),
            log::Level::Debug => ("D", DPFLTR_LEVEL::TRACE),
            log::Level::Info => ("I", DPFLTR_LEVEL::INFO),
            log::Level::Warn => ("W", DPFLTR_LEVEL::WARNING),
            log::Level::Error => ("E", DPFLTR_LEVEL::ERROR)
        };

        /* interior null chars would cut the message short */
        let mut payload = format!("[{}] {}", level_prefix, record.args()).into_bytes();
        payload.retain(|byte| *byte != 0);
        payload.push(0);

        unsafe {
            DbgPrintEx(DPFLTR_IHVDRIVER_ID, log_level as u32, "[DS]%s\n\0".as_ptr(), payload.as_ptr());
        }
    }

    fn flush(&self) { }
}

pub static APP_LOGGER: KernelLogger = KernelLogger;
