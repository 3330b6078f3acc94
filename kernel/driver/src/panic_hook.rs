use core::panic::PanicInfo;

use crate::kdef::{DbgBreakPoint, DbgPrintEx, KeBugCheck, DPFLTR_IHVDRIVER_ID, DPFLTR_LEVEL};

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    unsafe {
        DbgPrintEx(DPFLTR_IHVDRIVER_ID, DPFLTR_LEVEL::ERROR as u32, "[DS] Driver panicked. Trigger BugCheck.\n\0".as_ptr());
        DbgBreakPoint();
        KeBugCheck(1);
    }
}

/// Referenced by the compiler as soon as floating point is used.
#[export_name = "_fltused"]
static _FLTUSED: i32 = 0;

/// Referenced by `alloc`, never called with `panic = "abort"`.
#[no_mangle]
extern "C" fn __CxxFrameHandler3() -> ! {
    unsafe {
        DbgPrintEx(DPFLTR_IHVDRIVER_ID, DPFLTR_LEVEL::ERROR as u32, "[DS] __CxxFrameHandler3 has been called. This should not occur.\n\0".as_ptr());
        DbgBreakPoint();
        KeBugCheck(1);
    }
}
