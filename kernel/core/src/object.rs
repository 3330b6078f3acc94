//! Referenced access to kernel owned objects.
//!
//! Driver objects and device objects belong to the object manager. We only
//! ever hold a reference to them: every successful lookup hands out a guard
//! and dropping that guard performs the one matching release.

use crate::{
    inspect::{DeviceInfo, ImageNames},
    DriverError, DriverResult,
};

/// Access to the kernel object namespace.
///
/// The handle types are raw, copyable identifiers. Holding one does not keep
/// the object alive; only the guards returned by [`resolve_driver`] and
/// [`resolve_device`] do.
pub trait ObjectManager {
    type Driver: Copy;
    type File: Copy;
    type Device: Copy;

    /// Look up `\Driver\<Name>` and take a reference on it.
    fn reference_driver_by_name(&self, name: &str) -> Option<Self::Driver>;

    /// Drop a reference taken by [`ObjectManager::reference_driver_by_name`].
    ///
    /// # Safety
    /// `driver` must be a live reference which has not been released yet.
    unsafe fn release_driver(&self, driver: Self::Driver);

    /// Open `\Device\<Name>`. The file object is referenced, the device
    /// object is kept alive by that file object.
    fn reference_device_by_path(&self, path: &str) -> Option<(Self::File, Self::Device)>;

    /// # Safety
    /// `file` must be a live reference which has not been released yet.
    unsafe fn release_file(&self, file: Self::File);

    /// Driver owning `device`. The result carries no reference of its own.
    ///
    /// # Safety
    /// `device` must be kept alive by a referenced file object.
    unsafe fn device_owner(&self, device: Self::Device) -> Self::Driver;

    /// Names recorded in the loader entry of `driver`, `None` if the driver
    /// has no loader entry.
    ///
    /// # Safety
    /// `driver` must be kept alive by a reference for the duration of the call.
    unsafe fn image_names(&self, driver: Self::Driver) -> Option<ImageNames>;

    /// The first device object created by `driver`, if any.
    ///
    /// # Safety
    /// `driver` must be kept alive by a reference for the duration of the call.
    unsafe fn first_device(&self, driver: Self::Driver) -> Option<DeviceInfo>;
}

/// Read-only view on a driver object which is kept alive by someone else.
pub struct DriverView<'a, M: ObjectManager + ?Sized> {
    manager: &'a M,
    object: M::Driver,
}

impl<'a, M: ObjectManager + ?Sized> DriverView<'a, M> {
    pub fn as_raw(&self) -> M::Driver {
        self.object
    }

    pub fn image_names(&self) -> Option<ImageNames> {
        unsafe { self.manager.image_names(self.object) }
    }

    pub fn first_device(&self) -> Option<DeviceInfo> {
        unsafe { self.manager.first_device(self.object) }
    }
}

/// A referenced driver object.
pub struct DriverRef<'m, M: ObjectManager + ?Sized> {
    manager: &'m M,
    object: M::Driver,
}

impl<'m, M: ObjectManager + ?Sized> DriverRef<'m, M> {
    pub fn view(&self) -> DriverView<'_, M> {
        DriverView {
            manager: self.manager,
            object: self.object,
        }
    }
}

impl<'m, M: ObjectManager + ?Sized> Drop for DriverRef<'m, M> {
    fn drop(&mut self) {
        unsafe { self.manager.release_driver(self.object) };
    }
}

/// A device object reached through a referenced file object.
pub struct DeviceRef<'m, M: ObjectManager + ?Sized> {
    manager: &'m M,
    file: M::File,
    device: M::Device,
}

impl<'m, M: ObjectManager + ?Sized> DeviceRef<'m, M> {
    pub fn device(&self) -> M::Device {
        self.device
    }

    /// The driver which created this device.
    pub fn owner(&self) -> DriverView<'_, M> {
        DriverView {
            manager: self.manager,
            object: unsafe { self.manager.device_owner(self.device) },
        }
    }
}

impl<'m, M: ObjectManager + ?Sized> Drop for DeviceRef<'m, M> {
    fn drop(&mut self) {
        unsafe { self.manager.release_file(self.file) };
    }
}

/// Resolve a driver object by its namespace path, e.g. `\Driver\Null`.
///
/// Any failure of the underlying lookup is reported as [`DriverError::NotFound`].
pub fn resolve_driver<'m, M: ObjectManager + ?Sized>(
    manager: &'m M,
    name: &str,
) -> DriverResult<DriverRef<'m, M>> {
    if name.is_empty() {
        return Err(DriverError::NotFound);
    }

    manager
        .reference_driver_by_name(name)
        .map(|object| DriverRef { manager, object })
        .ok_or(DriverError::NotFound)
}

/// Resolve a device object by its namespace path, e.g. `\Device\Null`.
pub fn resolve_device<'m, M: ObjectManager + ?Sized>(
    manager: &'m M,
    path: &str,
) -> DriverResult<DeviceRef<'m, M>> {
    if path.is_empty() {
        return Err(DriverError::NotFound);
    }

    manager
        .reference_device_by_path(path)
        .map(|(file, device)| DeviceRef {
            manager,
            file,
            device,
        })
        .ok_or(DriverError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockKernel};

    #[test]
    fn missing_driver_is_not_found_and_takes_no_reference() {
        let kernel = MockKernel::new().with_driver(MockDriver::new("\\Driver\\Null"));
        let before = kernel.reference_count("\\Driver\\Null");

        let result = resolve_driver(&kernel, "\\Driver\\VBoxDrv");
        assert!(matches!(result, Err(DriverError::NotFound)));
        drop(result);

        assert_eq!(kernel.reference_count("\\Driver\\Null"), before);
        assert_eq!(kernel.outstanding_references(), 0);
    }

    #[test]
    fn empty_name_never_reaches_the_namespace() {
        let kernel = MockKernel::new();
        assert!(matches!(resolve_driver(&kernel, ""), Err(DriverError::NotFound)));
        assert!(matches!(resolve_device(&kernel, ""), Err(DriverError::NotFound)));
        assert_eq!(kernel.lookup_count(), 0);
    }

    #[test]
    fn acquire_then_release_keeps_reference_count() {
        let kernel = MockKernel::new().with_driver(MockDriver::new("\\Driver\\Capcom"));
        let before = kernel.reference_count("\\Driver\\Capcom");

        {
            let driver = resolve_driver(&kernel, "\\Driver\\Capcom").unwrap();
            assert_eq!(kernel.reference_count("\\Driver\\Capcom"), before + 1);
            let _ = driver.view().image_names();
        }

        assert_eq!(kernel.reference_count("\\Driver\\Capcom"), before);
        assert_eq!(kernel.release_count(), 1);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let kernel = MockKernel::new().with_driver(MockDriver::new("\\Driver\\BasicDisplay"));
        assert!(resolve_driver(&kernel, "\\driver\\basicdisplay").is_ok());
        assert_eq!(kernel.outstanding_references(), 0);
    }

    #[test]
    fn device_lookup_releases_file_object() {
        let kernel = MockKernel::new().with_driver(
            MockDriver::new("\\Driver\\Null").with_device("\\Device\\Null"),
        );

        {
            let device = resolve_device(&kernel, "\\Device\\Null").unwrap();
            assert_eq!(kernel.open_files(), 1);
            assert_eq!(device.owner().image_names().unwrap().base_name, "null.sys");
        }
        assert_eq!(kernel.open_files(), 0);

        assert!(matches!(
            resolve_device(&kernel, "\\Device\\Missing"),
            Err(DriverError::NotFound)
        ));
        assert_eq!(kernel.open_files(), 0);
    }
}
