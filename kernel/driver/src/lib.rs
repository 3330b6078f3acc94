#![no_std]
#![feature(sync_unsafe_cell)]

use alloc::vec::Vec;
use core::cell::SyncUnsafeCell;

use drvscope_core::{
    dispatch::{
        CompleteRequest, DeviceContext, DeviceRequest, IRP_MJ_CLOSE, IRP_MJ_CREATE,
        IRP_MJ_DEVICE_CONTROL,
    },
    handler::HandlerRegistry,
    lifecycle::{self, DeviceResources, LifecycleConfig},
    DriverError,
};
use kapi::{DeviceExtension, DeviceHandle, IrpCompletion, IrpEx, KernelObjects, KernelProcessTable, SymbolicLink};
use kdef::{DEVICE_FLAGS, DEVICE_OBJECT, DRIVER_OBJECT, IRP, NTSTATUS, UNICODE_STRING};
use winapi::shared::ntstatus::{STATUS_DRIVER_UNABLE_TO_LOAD, STATUS_SUCCESS};

use crate::{
    kdef::{DbgPrintEx, DPFLTR_IHVDRIVER_ID, DPFLTR_LEVEL},
    logger::APP_LOGGER,
};

mod kapi;
mod kdef;
mod logger;
mod panic_hook;

extern crate alloc;

static DEVICE_RESOURCES: SyncUnsafeCell<Option<DeviceResources<DeviceHandle, SymbolicLink>>> =
    SyncUnsafeCell::new(Option::None);

extern "system" fn driver_unload(_driver: &mut DRIVER_OBJECT) {
    /* removes the link, then drops the context and deletes the device */
    let resources = unsafe { &mut *DEVICE_RESOURCES.get() };
    let _ = resources.take();

    log::info!("Driver Unloaded");
}

fn dispatch(device: &DEVICE_OBJECT, irp: &mut IRP, request: DeviceRequest<'_>) -> NTSTATUS {
    let completion = IrpCompletion::new(irp);
    match unsafe { device.extension::<DeviceExtension>() } {
        Some(context) => context.dispatch(request, completion),
        None => {
            log::warn!("Missing device context");
            completion.complete(Err(DriverError::Unsuccessful))
        }
    }
}

extern "system" fn irp_create(device: &mut DEVICE_OBJECT, irp: &mut IRP) -> NTSTATUS {
    dispatch(device, irp, DeviceRequest::Create)
}

extern "system" fn irp_close(device: &mut DEVICE_OBJECT, irp: &mut IRP) -> NTSTATUS {
    dispatch(device, irp, DeviceRequest::Close)
}

extern "system" fn irp_unsupported(device: &mut DEVICE_OBJECT, irp: &mut IRP) -> NTSTATUS {
    let major = irp.current_stack_location().MajorFunction;
    dispatch(device, irp, DeviceRequest::Other(major))
}

extern "system" fn irp_control(device: &mut DEVICE_OBJECT, irp: &mut IRP) -> NTSTATUS {
    let (control_code, input_length, output_length) = {
        let param = irp.current_stack_location().ParametersDeviceIoControl();
        (
            param.IoControlCode,
            param.InputBufferLength as usize,
            param.OutputBufferLength as usize,
        )
    };

    /*
     * METHOD_BUFFERED: input and output share the system buffer.
     * Copy the input out before handing out the buffer for writing.
     */
    let system_buffer = irp.SystemBuffer as *mut u8;
    if system_buffer.is_null() && (input_length > 0 || output_length > 0) {
        log::warn!("IRP request without system buffer");
        return IrpCompletion::new(irp).complete(Err(DriverError::InvalidParameter));
    }

    let mut inbuffer = Vec::new();
    if input_length > 0 {
        if inbuffer.try_reserve_exact(input_length).is_err() {
            return IrpCompletion::new(irp).complete(Err(DriverError::AllocationFailure));
        }
        inbuffer.extend_from_slice(unsafe {
            core::slice::from_raw_parts(system_buffer, input_length)
        });
    }

    let outbuffer: &mut [u8] = if output_length > 0 {
        unsafe { core::slice::from_raw_parts_mut(system_buffer, output_length) }
    } else {
        &mut []
    };

    dispatch(
        device,
        irp,
        DeviceRequest::DeviceControl {
            control_code,
            input: &inbuffer,
            output: outbuffer,
        },
    )
}

#[no_mangle]
pub extern "system" fn driver_entry(driver: &mut DRIVER_OBJECT, _registry_path: *const UNICODE_STRING) -> NTSTATUS {
    log::set_max_level(log::LevelFilter::Trace);
    if log::set_logger(&APP_LOGGER).is_err() {
        unsafe {
            DbgPrintEx(DPFLTR_IHVDRIVER_ID, DPFLTR_LEVEL::ERROR as u32, "[DS] Failed to initialize app logger!\n\0".as_ptr());
        }
        return STATUS_DRIVER_UNABLE_TO_LOAD;
    }

    log::info!("Initialize driver");
    driver.DriverUnload = Some(driver_unload);
    for entry in driver.MajorFunction.iter_mut() {
        *entry = Some(irp_unsupported);
    }
    driver.MajorFunction[IRP_MJ_CREATE as usize] = Some(irp_create);
    driver.MajorFunction[IRP_MJ_CLOSE as usize] = Some(irp_close);
    driver.MajorFunction[IRP_MJ_DEVICE_CONTROL as usize] = Some(irp_control);

    let kernel = KernelObjects::new(driver);
    let mut resources = match lifecycle::initialize(&kernel, &LifecycleConfig::default()) {
        Ok(resources) => resources,
        Err(error) => {
            log::error!("Failed to initialize device: {}", error);
            return STATUS_DRIVER_UNABLE_TO_LOAD;
        }
    };

    let handlers = HandlerRegistry::with_default_handlers(KernelProcessTable);
    resources.device.install_context(DeviceContext::new(handlers));
    *resources.device.flags_mut() |= DEVICE_FLAGS::DO_BUFFERED_IO as u32;
    resources.device.mark_initialized();

    log::debug!(
        "Driver Object at 0x{:X}, Device Object at 0x{:X}",
        driver as *const _ as u64,
        resources.device.as_ptr() as u64
    );
    unsafe { *DEVICE_RESOURCES.get() = Some(resources) };

    log::info!("Driver Initialized");
    STATUS_SUCCESS
}
