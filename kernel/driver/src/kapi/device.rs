use core::mem::size_of;

use drvscope_core::dispatch::DeviceContext;

use crate::{
    kapi::{NTStatusEx, OwnedUnicodeString},
    kdef::{
        IoCreateDevice, IoCreateSymbolicLink, IoDeleteDevice, IoDeleteSymbolicLink,
        DEVICE_FLAGS, DRIVER_OBJECT, PDEVICE_OBJECT,
    },
};

/// What lives in the device extension of our device.
///
/// `None` until [`DeviceHandle::install_context`] has been called.
pub type DeviceExtension = Option<DeviceContext>;

/// Our own device object. Dropping it deletes the device.
pub struct DeviceHandle(PDEVICE_OBJECT);
unsafe impl Sync for DeviceHandle {}
unsafe impl Send for DeviceHandle {}

impl DeviceHandle {
    pub fn create(
        driver: &mut DRIVER_OBJECT,
        device_name: &OwnedUnicodeString,
        device_type: u32,
        characteristics: u32,
        exclusive: bool,
    ) -> anyhow::Result<Self> {
        let mut device_ptr: PDEVICE_OBJECT = core::ptr::null_mut();
        let result = unsafe {
            IoCreateDevice(
                driver,
                size_of::<DeviceExtension>() as u32,
                &device_name.as_unicode_string(),
                device_type,
                characteristics,
                exclusive,
                &mut device_ptr,
            )
        };

        if !result.is_ok() {
            anyhow::bail!("IoCreateDevice failed with 0x{:X}", result)
        }
        if device_ptr.is_null() {
            anyhow::bail!("IoCreateDevice returned no device")
        }

        /* the extension is zeroed, which is not necessarily a valid `None` */
        unsafe {
            ((*device_ptr).DeviceExtension as *mut DeviceExtension).write(None);
        }

        Ok(Self(device_ptr))
    }

    pub fn as_ptr(&self) -> PDEVICE_OBJECT {
        self.0
    }

    pub fn flags(&self) -> u32 {
        unsafe { (*self.0).Flags }
    }

    pub fn flags_mut(&mut self) -> &mut u32 {
        unsafe { &mut (*self.0).Flags }
    }

    /// Store the dispatch state. Must happen before [`DeviceHandle::mark_initialized`],
    /// afterwards the I/O manager may route requests to us at any time.
    pub fn install_context(&mut self, context: DeviceContext) {
        unsafe {
            *((*self.0).DeviceExtension as *mut DeviceExtension) = Some(context);
        }
    }

    pub fn mark_initialized(&mut self) {
        unsafe {
            (*self.0).Flags &= !(DEVICE_FLAGS::DO_DEVICE_INITIALIZING as u32);
        }
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        unsafe {
            core::ptr::drop_in_place((*self.0).DeviceExtension as *mut DeviceExtension);
            IoDeleteDevice(&mut *self.0);
        }
    }
}

/// A symbolic link in the object namespace. Dropping it removes the link.
pub struct SymbolicLink {
    name: OwnedUnicodeString,
}

impl SymbolicLink {
    pub fn create(name: OwnedUnicodeString, target: &OwnedUnicodeString) -> anyhow::Result<Self> {
        unsafe { IoCreateSymbolicLink(&name.as_unicode_string(), &target.as_unicode_string()) }
            .ok()
            .map_err(|status| anyhow::anyhow!("IoCreateSymbolicLink failed with 0x{:X}", status))?;

        Ok(Self { name })
    }
}

impl Drop for SymbolicLink {
    fn drop(&mut self) {
        let result = unsafe { IoDeleteSymbolicLink(&self.name.as_unicode_string()) };
        if let Err(status) = result.ok() {
            log::warn!("Failed to unlink dos device: 0x{:X}", status);
        }
    }
}
