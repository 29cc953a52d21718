//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! segbank-core for 74HC595-family display banks:
//!
//! - Bit-banged shift register bus (data, shift clock, latch clock)
//! - Multiplexed seven-segment controller with self-test

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod mock;

pub mod segment;
pub mod shift_register;

pub use segment::{SegmentDisplayController, SetupError};
pub use shift_register::{BusStep, ShiftRegister};
