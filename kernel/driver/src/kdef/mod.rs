//! Low level kernel definitions which are not provided by the winapi
#![allow(non_camel_case_types, non_snake_case, dead_code)]

mod general;
pub use general::*;

mod debug;
pub use debug::*;

mod pool;
pub use pool::*;

mod string;
pub use string::*;

mod object;
pub use object::*;

mod irql;
pub use irql::*;

mod dpc;
pub use dpc::*;

mod event;
pub use event::*;

mod driver;
pub use driver::*;

mod device;
pub use device::*;

mod irp;
pub use irp::*;

mod process;
pub use process::*;
