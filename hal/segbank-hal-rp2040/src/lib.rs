//! RP2040-specific HAL for the display firmware
//!
//! This crate provides RP2040 implementations of the shared `segbank-hal`
//! traits:
//!
//! - Dynamic pin allocation for config-driven setup ([`pins::PinBank`])
//! - Push-pull bus outputs ([`gpio::RpOutput`])

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pins;

pub use gpio::RpOutput;
pub use pins::PinBank;
pub use segbank_hal::{PinError, PinProvider};
