//! Kernel independent part of the driver.
//!
//! Everything in here talks to the kernel through the traits in [`object`],
//! [`lifecycle`] and [`handler`], which lets the driver crate provide the real
//! implementation while the tests run against an in-memory object graph.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod inspect;
pub mod lifecycle;
pub mod object;

#[cfg(test)]
mod mock;

pub use error::{DriverError, DriverResult};
