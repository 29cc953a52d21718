//! Display error types
//!
//! Every error here is raised while composing the buffer or validating
//! configuration, before any pin is touched.

use core::fmt;

/// Why a configuration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// Digit count is zero
    NoDisplays,
    /// Digit count exceeds what one select register can address
    TooManyDisplays,
    /// Wiring table length does not match the digit count
    WiringLength,
    /// Wiring table is not a permutation of the select bits
    WiringNotPermutation,
    /// Two bus signals share one GPIO
    PinConflict,
}

/// Errors that can occur when rendering to a display bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Character has no segment pattern
    UnsupportedCharacter {
        /// The offending character
        character: char,
        /// Char index in the input text
        position: usize,
    },
    /// More digits requested than the bank has
    DisplayOverflow {
        /// Digits needed, including `start_at` padding
        required: usize,
        /// Digits on the bank
        available: usize,
    },
    /// Driver or config cannot address the hardware as described
    InvalidConfiguration(ConfigIssue),
}

impl From<ConfigIssue> for DisplayError {
    fn from(issue: ConfigIssue) -> Self {
        DisplayError::InvalidConfiguration(issue)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigIssue::NoDisplays => "digit count must be at least 1",
            ConfigIssue::TooManyDisplays => "digit count exceeds one select register (8)",
            ConfigIssue::WiringLength => "wiring table length does not match digit count",
            ConfigIssue::WiringNotPermutation => "wiring table must use each select bit once",
            ConfigIssue::PinConflict => "data, clock and latch must be different pins",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::UnsupportedCharacter {
                character,
                position,
            } => write!(
                f,
                "unsupported character {:?} at position {}",
                character, position
            ),
            DisplayError::DisplayOverflow {
                required,
                available,
            } => write!(
                f,
                "text needs {} digits but the display has {}",
                required, available
            ),
            DisplayError::InvalidConfiguration(issue) => {
                write!(f, "invalid configuration: {}", issue)
            }
        }
    }
}
