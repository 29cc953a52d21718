//! Digit wiring maps
//!
//! The buffer is built left to right, but boards wire the digit-select
//! outputs in whatever order suited the layout. A [`DigitMap`] turns a
//! logical buffer index into the select bit (physical position) to drive.
//!
//! The common 4- and 8-digit modules wire select bit 0 to the rightmost
//! digit, so [`Reversed`] is the default.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigIssue;
use crate::MAX_DIGITS;

/// Map from logical digit index to physical select bit
pub trait DigitMap {
    /// Select bit for buffer index `index` on a bank of `num_displays` digits
    ///
    /// `index < num_displays` always holds when called by the driver.
    fn physical_position(&self, index: usize, num_displays: usize) -> usize;

    /// One-hot select mask for buffer index `index`
    ///
    /// A position past bit 7 selects nothing.
    fn select_mask(&self, index: usize, num_displays: usize) -> u8 {
        u32::try_from(self.physical_position(index, num_displays))
            .ok()
            .and_then(|pos| 1u8.checked_shl(pos))
            .unwrap_or(0)
    }

    /// Check that this map can address a bank of `num_displays` digits
    fn validate(&self, _num_displays: usize) -> Result<(), ConfigIssue> {
        Ok(())
    }
}

/// Buffer index 0 drives the highest select bit (`num_displays - 1 - i`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reversed;

impl DigitMap for Reversed {
    fn physical_position(&self, index: usize, num_displays: usize) -> usize {
        num_displays - 1 - index
    }
}

/// Buffer index i drives select bit i
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Direct;

impl DigitMap for Direct {
    fn physical_position(&self, index: usize, _num_displays: usize) -> usize {
        index
    }
}

/// Explicit per-digit select bits, for boards with scrambled wiring
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Table {
    positions: Vec<u8, MAX_DIGITS>,
}

impl Table {
    /// Build a table where `positions[i]` is the select bit of digit `i`
    ///
    /// The table must use every select bit below its length exactly once.
    pub fn new(positions: &[u8]) -> Result<Self, ConfigIssue> {
        let positions = Vec::from_slice(positions).map_err(|_| ConfigIssue::TooManyDisplays)?;
        let table = Self { positions };
        table.check(table.positions.len())?;
        Ok(table)
    }

    /// Number of digits described
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn check(&self, num_displays: usize) -> Result<(), ConfigIssue> {
        if self.positions.len() != num_displays {
            return Err(ConfigIssue::WiringLength);
        }
        let mut seen = 0u16;
        for &pos in &self.positions {
            if pos as usize >= num_displays || seen & (1 << pos) != 0 {
                return Err(ConfigIssue::WiringNotPermutation);
            }
            seen |= 1 << pos;
        }
        Ok(())
    }
}

impl DigitMap for Table {
    fn physical_position(&self, index: usize, _num_displays: usize) -> usize {
        self.positions[index] as usize
    }

    /// The table must describe exactly `num_displays` digits
    fn validate(&self, num_displays: usize) -> Result<(), ConfigIssue> {
        self.check(num_displays)
    }
}

impl<M: DigitMap + ?Sized> DigitMap for &M {
    fn physical_position(&self, index: usize, num_displays: usize) -> usize {
        (**self).physical_position(index, num_displays)
    }

    fn validate(&self, num_displays: usize) -> Result<(), ConfigIssue> {
        (**self).validate(num_displays)
    }
}

/// Plain function wiring, e.g. `|i, _| (i + 2) % 4`
pub struct FnMap<F>(pub F);

impl<F> DigitMap for FnMap<F>
where
    F: Fn(usize, usize) -> usize,
{
    fn physical_position(&self, index: usize, num_displays: usize) -> usize {
        (self.0)(index, num_displays)
    }
}
