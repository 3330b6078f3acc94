//! Interrupt Request Level (IRQL).

/// IRQL type.
pub type KIRQL = u8;

/// Passive release level, no interrupt vectors are masked.
pub const PASSIVE_LEVEL: KIRQL = 0;
/// APC interrupt level.
pub const APC_LEVEL: KIRQL = 1;
/// Dispatcher level
pub const DISPATCH_LEVEL: KIRQL = 2;
