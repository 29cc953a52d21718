//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so the bus pins
//! can come from `display.toml` instead of being hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{Peri, Peripherals};
use segbank_hal::{PinError, PinProvider};

use crate::gpio::{bus_output, RpOutput};

/// Number of user GPIOs on the RP2040
pub const NUM_PINS: u8 = 30;

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; NUM_PINS as usize],
    reserved: u32,
}

impl PinBank {
    /// Create a pin bank from the chip peripherals
    ///
    /// Takes ownership of every GPIO; other peripherals are dropped.
    pub fn from_peripherals(p: Peripherals) -> Self {
        Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
            reserved: 0,
        }
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin is reserved for a board function
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= NUM_PINS {
            return Err(PinError::InvalidPin);
        }
        if self.reserved & (1 << pin_num) != 0 {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Keep a pin out of config-driven allocation
    ///
    /// Used for pins the board wires to something fixed (LED, SMPS mode).
    pub fn reserve(&mut self, pin_num: u8) {
        if pin_num < NUM_PINS {
            self.reserved |= 1 << pin_num;
        }
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        if pin_num >= NUM_PINS {
            return false;
        }
        self.reserved & (1 << pin_num) == 0 && self.pins[pin_num as usize].is_some()
    }
}

impl PinProvider for PinBank {
    type Pin = RpOutput;

    fn output(&mut self, pin: u8) -> Result<RpOutput, PinError> {
        self.take(pin).map(bus_output)
    }
}
