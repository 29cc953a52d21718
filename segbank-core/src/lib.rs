//! Board-agnostic core logic for seven-segment display banks
//!
//! This crate contains everything that does not touch a pin:
//!
//! - Character to segment encoding (active-low, decimal point in bit 7)
//! - Display buffer composition (padding, decimal point folding, overflow)
//! - Digit wiring maps (logical digit index to select bit)
//! - Configuration types and the config text parser
//! - The display driver trait and render options

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod config;
pub mod encoding;
pub mod error;
pub mod traits;
pub mod wiring;

pub use buffer::DisplayBuffer;
pub use encoding::Segments;
pub use error::{ConfigIssue, DisplayError};
pub use traits::{MultiplexedDisplay, RenderOptions};
pub use wiring::{DigitMap, Direct, FnMap, Reversed, Table};

/// Largest digit count a single select register can address
pub const MAX_DIGITS: usize = 8;
