//! Load time sequence of the driver.

use drvscope_shared::{DEVICE_PATH, DOS_DEVICE_PATH};

use crate::{
    inspect::inspect_driver,
    object::ObjectManager,
    DriverError, DriverResult,
};

/// Drivers looked up and reported while loading.
pub const INSPECT_TARGETS: [&str; 3] = [
    "\\Driver\\VBoxDrv",
    "\\Driver\\Capcom",
    "\\Driver\\BasicDisplay",
];

/// Compiled in load time configuration.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub device_path: &'static str,
    pub dos_device_path: &'static str,
    pub inspect_targets: &'static [&'static str],
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            device_path: DEVICE_PATH,
            dos_device_path: DOS_DEVICE_PATH,
            inspect_targets: &INSPECT_TARGETS,
        }
    }
}

/// Creation of our own named device.
///
/// Dropping a `Device` deletes the device object, dropping a `Link` deletes
/// the symbolic link.
pub trait DeviceFactory {
    type Device;
    type Link;

    fn create_device(&self, device_path: &str) -> DriverResult<Self::Device>;
    fn create_symbolic_link(&self, link_path: &str, device_path: &str) -> DriverResult<Self::Link>;
}

/// Resources which stay alive while the driver is resident.
///
/// The link is declared first so it is removed before the device goes away.
pub struct DeviceResources<D, L> {
    pub link: L,
    pub device: D,
}

/// Report every inspection target. Targets which are not loaded are expected
/// and never fail the load.
pub fn inspect_targets<M: ObjectManager + ?Sized>(objects: &M, targets: &[&str]) {
    for target in targets {
        match inspect_driver(objects, target) {
            Ok(report) => log::info!("Found {}", report),
            Err(DriverError::NotFound) => log::warn!("{} is not loaded", target),
            Err(error) => log::warn!("Failed to inspect {}: {}", target, error),
        }
    }
}

/// Run the load time sequence: report the inspection targets, then create
/// the device and its symbolic link. Only the latter can fail the load.
pub fn initialize<K>(
    kernel: &K,
    config: &LifecycleConfig,
) -> DriverResult<DeviceResources<<K as DeviceFactory>::Device, K::Link>>
where
    K: ObjectManager + DeviceFactory,
{
    inspect_targets(kernel, config.inspect_targets);

    let device = kernel.create_device(config.device_path).map_err(|error| {
        log::error!("Failed to create {}: {}", config.device_path, error);
        error
    })?;

    /* on failure the device is dropped and thereby deleted again */
    let link = kernel
        .create_symbolic_link(config.dos_device_path, config.device_path)
        .map_err(|error| {
            log::error!("Failed to link {}: {}", config.dos_device_path, error);
            error
        })?;

    Ok(DeviceResources { link, device })
}
