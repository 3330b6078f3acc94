//! Read-only inspection of loaded drivers.

use alloc::string::String;
use core::fmt;

use crate::{
    object::{resolve_device, resolve_driver, DriverView, ObjectManager},
    DriverResult,
};

/// Object header type of a `DEVICE_OBJECT` (`IO_TYPE_DEVICE`).
pub const IO_TYPE_DEVICE: u16 = 3;

/// Names recorded by the loader for a driver image.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageNames {
    pub full_path: String,
    pub base_name: String,
}

/// Snapshot of the fields we care about on a device object.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub object_type: u16,
    pub device_type: u32,
    pub flags: u32,
    pub active_thread_count: u32,
}

impl DeviceInfo {
    pub fn is_device_object(&self) -> bool {
        self.object_type == IO_TYPE_DEVICE
    }
}

/// Everything collected about one driver while we held a reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverReport {
    pub name: String,
    pub image: Option<ImageNames>,
    pub device: Option<DeviceInfo>,
}

impl DriverReport {
    fn collect<M: ObjectManager + ?Sized>(name: &str, driver: DriverView<'_, M>) -> Self {
        Self {
            name: name.into(),
            image: driver.image_names(),
            device: driver.first_device(),
        }
    }
}

impl fmt::Display for DriverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match &self.image {
            Some(image) => write!(f, " image={} ({})", image.base_name, image.full_path)?,
            None => write!(f, " image=<no loader entry>")?,
        }
        match &self.device {
            Some(device) => write!(
                f,
                " device_type=0x{:X} active_threads={}",
                device.device_type, device.active_thread_count
            ),
            None => write!(f, " device=<none>"),
        }
    }
}

/// Resolve `name`, read its loader entry and first device, then release it.
pub fn inspect_driver<M: ObjectManager + ?Sized>(
    manager: &M,
    name: &str,
) -> DriverResult<DriverReport> {
    let driver = resolve_driver(manager, name)?;
    let report = DriverReport::collect(name, driver.view());
    drop(driver);

    if let Some(device) = &report.device {
        if device.is_device_object() {
            log::debug!("{}: device object matches the known layout", name);
        } else {
            log::warn!(
                "{}: first device has unexpected object type {}",
                name,
                device.object_type
            );
        }
    }

    Ok(report)
}

/// Open the device at `path` and inspect the driver owning it.
pub fn inspect_device<M: ObjectManager + ?Sized>(
    manager: &M,
    path: &str,
) -> DriverResult<DriverReport> {
    let device = resolve_device(manager, path)?;
    Ok(DriverReport::collect(path, device.owner()))
}
