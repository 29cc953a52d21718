//! Configuration type definitions
//!
//! One [`DisplayConfig`] describes one display bank: how many digits it has,
//! how the select lines are wired, which GPIOs drive the bus and what the
//! firmware shows on it.

use heapless::String;

use crate::buffer::check_num_displays;
use crate::error::ConfigIssue;
use crate::traits::display::DEFAULT_REDRAW_COUNT;
use crate::traits::RenderOptions;
use crate::wiring::{DigitMap, Direct, Reversed, Table};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum message length in the config (dots included)
pub const MAX_MESSAGE_LEN: usize = 32;

/// Default message shown by the firmware
pub const DEFAULT_MESSAGE: &str = "HELLO";

/// Digit wiring order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WiringOrder {
    /// First digit on the highest select bit
    #[default]
    Reversed,
    /// First digit on select bit 0
    Direct,
    /// Explicit select bit per digit
    Table(Table),
}

impl DigitMap for WiringOrder {
    fn physical_position(&self, index: usize, num_displays: usize) -> usize {
        match self {
            WiringOrder::Reversed => Reversed.physical_position(index, num_displays),
            WiringOrder::Direct => Direct.physical_position(index, num_displays),
            WiringOrder::Table(t) => t.physical_position(index, num_displays),
        }
    }

    fn validate(&self, num_displays: usize) -> Result<(), ConfigIssue> {
        match self {
            WiringOrder::Table(t) => t.validate(num_displays),
            _ => Ok(()),
        }
    }
}

/// GPIO numbers of the three bus signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusPins {
    /// Serial data (DIO / DS)
    pub data: u8,
    /// Shift clock (SCLK / SH_CP)
    pub clock: u8,
    /// Latch clock (RCLK / ST_CP)
    pub latch: u8,
}

impl Default for BusPins {
    fn default() -> Self {
        Self {
            data: 18,
            clock: 21,
            latch: 20,
        }
    }
}

impl BusPins {
    /// Check that no two signals share a GPIO
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.data == self.clock || self.data == self.latch || self.clock == self.latch {
            return Err(ConfigIssue::PinConflict);
        }
        Ok(())
    }
}

/// Display bank configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Number of digits (1-8)
    pub num_displays: u8,
    /// Select line wiring
    pub wiring: WiringOrder,
    /// Refresh passes per render
    pub redraw_count: u32,
    /// Blank the bank after each render
    pub clear_after: bool,
    /// Run the self-test at boot
    pub self_test: bool,
    /// Text the firmware shows
    pub message: String<MAX_MESSAGE_LEN>,
    /// Bus GPIOs
    pub pins: BusPins,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut message = String::new();
        let _ = message.push_str(DEFAULT_MESSAGE);
        Self {
            num_displays: 8,
            wiring: WiringOrder::Reversed,
            redraw_count: DEFAULT_REDRAW_COUNT,
            clear_after: true,
            self_test: false,
            message,
            pins: BusPins::default(),
        }
    }
}

impl DisplayConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check digit count, wiring table and pin assignment
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        let n = self.num_displays as usize;
        check_num_displays(n)?;
        self.wiring.validate(n)?;
        self.pins.validate()
    }

    /// Render options matching this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .redraw_count(self.redraw_count)
            .clear_after(self.clear_after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DisplayConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.message.as_str(), "HELLO");
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_digit_count_limits() {
        let mut config = DisplayConfig::default();

        config.num_displays = 0;
        assert_eq!(config.validate(), Err(ConfigIssue::NoDisplays));

        config.num_displays = 9;
        assert_eq!(config.validate(), Err(ConfigIssue::TooManyDisplays));

        config.num_displays = 1;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_wiring_table_must_match_digits() {
        let mut config = DisplayConfig::default();
        config.num_displays = 4;
        config.wiring = WiringOrder::Table(Table::new(&[1, 0]).unwrap());
        assert_eq!(config.validate(), Err(ConfigIssue::WiringLength));

        config.wiring = WiringOrder::Table(Table::new(&[1, 0, 3, 2]).unwrap());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_pin_conflict() {
        let mut config = DisplayConfig::default();
        config.pins.latch = config.pins.clock;
        assert_eq!(config.validate(), Err(ConfigIssue::PinConflict));
    }

    #[test]
    fn test_wiring_order_maps() {
        assert_eq!(WiringOrder::Reversed.physical_position(0, 4), 3);
        assert_eq!(WiringOrder::Direct.physical_position(0, 4), 0);
        let table = WiringOrder::Table(Table::new(&[2, 0, 1]).unwrap());
        assert_eq!(table.select_mask(0, 3), 0b100);
    }
}
