//! Multiplexed seven-segment controller
//!
//! Only one digit is lit at a time. A render pass walks the buffer and, for
//! each digit, shifts its segment byte plus a one-hot select mask and
//! latches. Repeating passes fast enough makes the whole text appear
//! steady; the pass count is the only notion of time.
//!
//! ```text
//!  buffer[i] ──► segments ─┐
//!                          ├─► ShiftRegister::set_port ─► latch
//!  wiring(i) ──► 1 << pos ─┘
//! ```

mod selftest;

use core::fmt;

use segbank_core::{
    buffer::check_num_displays, DigitMap, DisplayBuffer, DisplayError, MultiplexedDisplay,
    RenderOptions, Reversed, Segments,
};
use segbank_hal::{OutputPin, PinError, PinProvider};

use crate::shift_register::ShiftRegister;

/// Failure while building a controller from pin numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// A bus pin could not be configured as an output
    Pin(PinError),
    /// Digit count or wiring rejected
    Display(DisplayError),
}

impl From<PinError> for SetupError {
    fn from(e: PinError) -> Self {
        SetupError::Pin(e)
    }
}

impl From<DisplayError> for SetupError {
    fn from(e: DisplayError) -> Self {
        SetupError::Display(e)
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Pin(PinError::InvalidPin) => f.write_str("pin does not exist"),
            SetupError::Pin(PinError::AlreadyTaken) => f.write_str("pin already in use"),
            SetupError::Pin(PinError::Reserved) => f.write_str("pin is reserved"),
            SetupError::Display(e) => write!(f, "{}", e),
        }
    }
}

/// Seven-segment bank behind two chained 74HC595s
///
/// Generic over the three bus pins and the digit wiring map `M`.
pub struct SegmentDisplayController<D, C, L, M = Reversed> {
    bus: ShiftRegister<D, C, L>,
    num_displays: usize,
    wiring: M,
}

impl<D, C, L> SegmentDisplayController<D, C, L, Reversed>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    /// Create a controller with the default reversed wiring
    ///
    /// No bus I/O happens here; call [`MultiplexedDisplay::clear`] to put
    /// the bank in a known state.
    pub fn new(data: D, clock: C, latch: L, num_displays: usize) -> Result<Self, DisplayError> {
        Self::with_wiring(data, clock, latch, num_displays, Reversed)
    }
}

impl<T: OutputPin> SegmentDisplayController<T, T, T, Reversed> {
    /// Create a controller from GPIO numbers with the default wiring
    pub fn from_pin_numbers<P: PinProvider<Pin = T>>(
        provider: &mut P,
        data: u8,
        clock: u8,
        latch: u8,
        num_displays: usize,
    ) -> Result<Self, SetupError> {
        Self::from_pin_numbers_with_wiring(provider, data, clock, latch, num_displays, Reversed)
    }
}

impl<T: OutputPin, M: DigitMap> SegmentDisplayController<T, T, T, M> {
    /// Create a controller from GPIO numbers
    ///
    /// Digit count and wiring are checked before any pin is taken. Pins
    /// are requested in data, clock, latch order. If a later pin fails,
    /// the ones already taken are dropped and stay claimed in `provider`.
    pub fn from_pin_numbers_with_wiring<P: PinProvider<Pin = T>>(
        provider: &mut P,
        data: u8,
        clock: u8,
        latch: u8,
        num_displays: usize,
        wiring: M,
    ) -> Result<Self, SetupError> {
        check_num_displays(num_displays).map_err(DisplayError::from)?;
        wiring
            .validate(num_displays)
            .map_err(DisplayError::from)?;

        let data = provider.output(data)?;
        let clock = provider.output(clock)?;
        let latch = provider.output(latch)?;

        Ok(Self::with_wiring(data, clock, latch, num_displays, wiring)?)
    }
}

impl<D, C, L, M> SegmentDisplayController<D, C, L, M>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    M: DigitMap,
{
    /// Create a controller with an explicit wiring map
    pub fn with_wiring(
        data: D,
        clock: C,
        latch: L,
        num_displays: usize,
        wiring: M,
    ) -> Result<Self, DisplayError> {
        check_num_displays(num_displays)?;
        wiring.validate(num_displays)?;

        Ok(Self {
            bus: ShiftRegister::new(data, clock, latch),
            num_displays,
            wiring,
        })
    }

    /// Shift one byte in without latching
    pub fn send_byte(&mut self, value: u8) {
        self.bus.send_byte(value);
    }

    /// Shift one segment byte and select mask, then latch
    pub fn set_port(&mut self, segments: u8, select: u8) {
        self.bus.set_port(segments, select);
    }

    /// Build the buffer for `sequence` on this bank without drawing it
    pub fn compose(&self, sequence: &str, start_at: usize) -> Result<DisplayBuffer, DisplayError> {
        DisplayBuffer::compose(sequence, start_at, self.num_displays)
    }

    /// Refresh a pre-composed buffer `redraw_count` times
    ///
    /// Does not clear afterwards. A buffer longer than the bank is rejected
    /// before anything is drawn.
    pub fn show_buffer(
        &mut self,
        buffer: &DisplayBuffer,
        redraw_count: u32,
    ) -> Result<(), DisplayError> {
        if buffer.len() > self.num_displays {
            return Err(DisplayError::DisplayOverflow {
                required: buffer.len(),
                available: self.num_displays,
            });
        }

        for _ in 0..redraw_count {
            self.draw_pass(buffer);
        }
        Ok(())
    }

    /// Release the bus pins
    pub fn release(self) -> (D, C, L) {
        self.bus.release()
    }

    fn draw_pass(&mut self, buffer: &DisplayBuffer) {
        for (i, segments) in buffer.iter().enumerate() {
            let select = self.wiring.select_mask(i, self.num_displays);
            self.bus.set_port(segments.bits(), select);
        }
    }
}

impl<D, C, L, M> MultiplexedDisplay for SegmentDisplayController<D, C, L, M>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    M: DigitMap,
{
    fn num_displays(&self) -> usize {
        self.num_displays
    }

    fn clear(&mut self) {
        for i in 0..self.num_displays {
            self.bus.set_port(Segments::BLANK.bits(), 1 << i);
        }
    }

    fn render_with(&mut self, sequence: &str, options: RenderOptions) -> Result<(), DisplayError> {
        let buffer = self.compose(sequence, options.start_at)?;

        for _ in 0..options.redraw_count {
            self.draw_pass(&buffer);
        }

        if options.clear_after {
            self.clear();
        }
        Ok(())
    }
}
