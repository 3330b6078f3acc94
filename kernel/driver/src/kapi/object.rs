use core::ptr::{self, NonNull};

use drvscope_core::{
    inspect::{DeviceInfo, ImageNames},
    lifecycle::DeviceFactory,
    object::ObjectManager,
    DriverError, DriverResult,
};

use crate::{
    kapi::{DeviceHandle, NTStatusEx, OwnedUnicodeString, SymbolicLink, UnicodeStringEx},
    kdef::{
        IoDriverObjectType, IoGetDeviceObjectPointer, ObReferenceObjectByName,
        ObfDereferenceObject, DEVICE_OBJECT, DRIVER_OBJECT, FILE_DEVICE_SECURE_OPEN,
        FILE_DEVICE_UNKNOWN, FILE_OBJECT, FILE_READ_ATTRIBUTES, KPROCESSOR_MODE,
        OBJ_CASE_INSENSITIVE, PFILE_OBJECT, PVOID,
    },
};

/// The live object manager, seen from our own driver object.
pub struct KernelObjects {
    driver: NonNull<DRIVER_OBJECT>,
}

impl KernelObjects {
    pub fn new(driver: &mut DRIVER_OBJECT) -> Self {
        Self {
            driver: NonNull::from(driver),
        }
    }
}

impl ObjectManager for KernelObjects {
    type Driver = NonNull<DRIVER_OBJECT>;
    type File = NonNull<FILE_OBJECT>;
    type Device = NonNull<DEVICE_OBJECT>;

    fn reference_driver_by_name(&self, name: &str) -> Option<Self::Driver> {
        let name_buffer = OwnedUnicodeString::new(name).ok()?;

        let mut object: PVOID = ptr::null_mut();
        let status = unsafe {
            ObReferenceObjectByName(
                &name_buffer.as_unicode_string(),
                OBJ_CASE_INSENSITIVE,
                ptr::null_mut(),
                0,
                *IoDriverObjectType,
                KPROCESSOR_MODE::KernelMode,
                ptr::null_mut(),
                &mut object,
            )
        };

        if let Err(status) = status.ok() {
            log::trace!("ObReferenceObjectByName({}) failed with 0x{:X}", name, status);
            return None;
        }

        NonNull::new(object as *mut DRIVER_OBJECT)
    }

    unsafe fn release_driver(&self, driver: Self::Driver) {
        ObfDereferenceObject(driver.as_ptr() as _);
    }

    fn reference_device_by_path(&self, path: &str) -> Option<(Self::File, Self::Device)> {
        let name_buffer = OwnedUnicodeString::new(path).ok()?;

        let mut file: PFILE_OBJECT = ptr::null_mut();
        let mut device: *mut DEVICE_OBJECT = ptr::null_mut();
        let status = unsafe {
            IoGetDeviceObjectPointer(
                &name_buffer.as_unicode_string(),
                FILE_READ_ATTRIBUTES,
                &mut file,
                &mut device,
            )
        };

        if let Err(status) = status.ok() {
            log::trace!("IoGetDeviceObjectPointer({}) failed with 0x{:X}", path, status);
            return None;
        }

        let file = NonNull::new(file)?;
        match NonNull::new(device) {
            Some(device) => Some((file, device)),
            None => {
                unsafe { self.release_file(file) };
                None
            }
        }
    }

    unsafe fn release_file(&self, file: Self::File) {
        ObfDereferenceObject(file.as_ptr() as _);
    }

    unsafe fn device_owner(&self, device: Self::Device) -> Self::Driver {
        /* every device object is created by, and points to, a driver object */
        NonNull::new_unchecked((*device.as_ptr()).DriverObject)
    }

    unsafe fn image_names(&self, driver: Self::Driver) -> Option<ImageNames> {
        let entry = driver.as_ref().DriverSection.as_ref()?;
        Some(ImageNames {
            full_path: entry.FullDllName.as_string_lossy(),
            base_name: entry.BaseDllName.as_string_lossy(),
        })
    }

    unsafe fn first_device(&self, driver: Self::Driver) -> Option<DeviceInfo> {
        let device = driver.as_ref().DeviceObject.as_ref()?;
        Some(DeviceInfo {
            object_type: device.Type,
            device_type: device.DeviceType,
            flags: device.Flags,
            active_thread_count: device.ActiveThreadCount,
        })
    }
}

impl DeviceFactory for KernelObjects {
    type Device = DeviceHandle;
    type Link = SymbolicLink;

    fn create_device(&self, device_path: &str) -> DriverResult<DeviceHandle> {
        let device_name = OwnedUnicodeString::new(device_path)?;
        DeviceHandle::create(
            unsafe { &mut *self.driver.as_ptr() },
            &device_name,
            FILE_DEVICE_UNKNOWN,
            FILE_DEVICE_SECURE_OPEN,
            false,
        )
        .map_err(|error| {
            log::debug!("{}", error);
            DriverError::Unsuccessful
        })
    }

    fn create_symbolic_link(&self, link_path: &str, device_path: &str) -> DriverResult<SymbolicLink> {
        let link_name = OwnedUnicodeString::new(link_path)?;
        let device_name = OwnedUnicodeString::new(device_path)?;
        SymbolicLink::create(link_name, &device_name).map_err(|error| {
            log::debug!("{}", error);
            DriverError::Unsuccessful
        })
    }
}
