#![cfg_attr(not(test), no_std)]

pub mod requests;

/// Name shared by the device object and its DOS symbolic link.
pub const DEVICE_NAME: &str = "drvscope";

/// Kernel namespace path of the device object.
pub const DEVICE_PATH: &str = "\\Device\\drvscope";

/// Symbolic link exposed to user mode (`\\.\drvscope`).
pub const DOS_DEVICE_PATH: &str = "\\DosDevices\\drvscope";

/// Process state as reported by [`requests::RequestProcessStatus`].
#[repr(u32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    #[default]
    Running = 0,
    Terminated = 1,
    UnknownProcess = 2,
}
