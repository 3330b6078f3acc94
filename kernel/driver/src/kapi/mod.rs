#![allow(dead_code)]

mod allocator;

mod device;
pub use device::*;

mod irp;
pub use irp::*;

mod object;
pub use object::*;

mod process;
pub use process::*;

mod status;
pub use status::*;

mod string;
pub use string::*;
