use drvscope_shared::requests::{RequestExample, ResponseExample};

use crate::DriverResult;

pub fn handler_example(req: &RequestExample, _res: &mut ResponseExample) -> DriverResult<()> {
    log::info!("Received IO request '{}' from user-mode.", req.value);
    Ok(())
}
