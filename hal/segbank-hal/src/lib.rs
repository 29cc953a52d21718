//! Segbank Hardware Abstraction Layer
//!
//! This crate defines the pin capability the display drivers need. It is
//! implemented by chip-specific HALs (RP2040, ...) or, on the host, by
//! recording fakes in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (segbank-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segbank-drivers (shift register bus)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segbank-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ segbank-hal-  │       │  embedded-hal │
//! │    rp2040     │       │    adapter    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Write-only digital output
//! - [`gpio::PinProvider`] - Configure a numbered GPIO as an output

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

// Re-export key traits at crate root for convenience
pub use gpio::{EhOutput, OutputPin, PinError, PinProvider};
