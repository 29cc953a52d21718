//! Bit-banged 74HC595 bus
//!
//! Two registers are chained: the first byte shifted ends up in the far
//! register (segment lines), the second in the near one (digit select).
//!
//! Wire protocol per bit, most significant bit first:
//!
//! ```text
//!  data   ─┤ bit ├───────────────
//!  clock  ──────┐   ┌───────────   rising edge samples data
//!               └───┘
//! ```
//!
//! After 16 bits, a low-high pulse on the latch copies both registers to
//! their outputs at once, so the digits never show a half-shifted pattern.
//! There are no delays: the edge order is all the register needs.

use segbank_hal::OutputPin;

/// One pin write on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusStep {
    /// Drive the data line to a bit value
    Data(bool),
    /// Pull the shift clock low
    ClockLow,
    /// Raise the shift clock (shifts one bit in)
    ClockHigh,
    /// Pull the latch clock low
    LatchLow,
    /// Raise the latch clock (commits to outputs)
    LatchHigh,
}

/// Latch pulse committing shifted data
pub const LATCH_PULSE: [BusStep; 2] = [BusStep::LatchLow, BusStep::LatchHigh];

/// Steps shifting one byte out, most significant bit first
///
/// Always 24 steps: data, clock low, clock high for each of the 8 bits.
pub fn byte_steps(value: u8) -> impl Iterator<Item = BusStep> {
    (0..8).rev().flat_map(move |bit| {
        [
            BusStep::Data((value >> bit) & 1 == 1),
            BusStep::ClockLow,
            BusStep::ClockHigh,
        ]
    })
}

/// Three-wire shift register bus
///
/// Owns the data, shift clock and latch clock pins. Pin levels before the
/// first write are whatever the platform left them at.
pub struct ShiftRegister<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D, C, L> ShiftRegister<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    /// Create a bus on three output pins
    pub fn new(data: D, clock: C, latch: L) -> Self {
        Self { data, clock, latch }
    }

    /// Perform one pin write
    pub fn apply(&mut self, step: BusStep) {
        match step {
            BusStep::Data(bit) => self.data.set_state(bit),
            BusStep::ClockLow => self.clock.set_low(),
            BusStep::ClockHigh => self.clock.set_high(),
            BusStep::LatchLow => self.latch.set_low(),
            BusStep::LatchHigh => self.latch.set_high(),
        }
    }

    /// Shift one byte in, most significant bit first
    pub fn send_byte(&mut self, value: u8) {
        for step in byte_steps(value) {
            self.apply(step);
        }
    }

    /// Pulse the latch so shifted data appears on the outputs
    pub fn latch(&mut self) {
        for step in LATCH_PULSE {
            self.apply(step);
        }
    }

    /// Shift a segment byte and a select mask, then latch both
    ///
    /// This is one bus transaction: the only operation that changes what
    /// the digits show.
    pub fn set_port(&mut self, segments: u8, select: u8) {
        self.send_byte(segments);
        self.send_byte(select);
        self.latch();
    }

    /// Release the pins
    pub fn release(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }
}
