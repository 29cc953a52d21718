//! GPIO pin abstractions
//!
//! The display bus only ever drives pins, it never reads them back, so the
//! output trait is write-only.

use core::convert::Infallible;

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Writes cannot fail from the driver's point of view.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn set_state(&mut self, high: bool) {
        (**self).set_state(high);
    }
}

/// Error when configuring a pin as an output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number does not exist on this chip
    InvalidPin,
    /// Pin already handed out
    AlreadyTaken,
    /// Pin reserved for a special function
    Reserved,
}

/// Source of output pins addressed by number
///
/// This is the "configure as output" capability: the platform maps a pin
/// identifier to hardware and returns a handle that is already in output
/// mode.
pub trait PinProvider {
    /// Output pin type handed out by this provider
    type Pin: OutputPin;

    /// Configure pin `pin` as a digital output and take ownership of it
    fn output(&mut self, pin: u8) -> Result<Self::Pin, PinError>;
}

/// Adapter for infallible `embedded-hal` 1.0 output pins
///
/// Most chip HALs (embassy, esp-hal, rp2040-hal) report
/// `Error = Infallible` for push-pull outputs.
///
/// ```ignore
/// let data = EhOutput::new(Output::new(p.PIN_18, Level::Low));
/// ```
pub struct EhOutput<P>(P);

impl<P> EhOutput<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    /// Wrap an `embedded-hal` output pin
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}
