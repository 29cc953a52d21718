//! Recording pins for host tests
//!
//! All three bus pins share one log so tests can check the interleaving
//! of writes across lines, and replay it through a model of two chained
//! 74HC595s.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::vec::Vec;

use segbank_hal::{OutputPin, PinError, PinProvider};

/// Bus line a write went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
    Latch,
}

/// What the two registers showed after one latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub segments: u8,
    pub select: u8,
}

/// Shared write log
#[derive(Clone, Default)]
pub struct BusLog(Rc<RefCell<Vec<(Line, bool)>>>);

impl BusLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data, clock and latch pins writing to this log
    pub fn pins(&self) -> (MockPin, MockPin, MockPin) {
        (
            MockPin::new(Line::Data, self.clone()),
            MockPin::new(Line::Clock, self.clone()),
            MockPin::new(Line::Latch, self.clone()),
        )
    }

    pub fn writes(&self) -> Vec<(Line, bool)> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Replay the log through a 16-bit shift chain
    ///
    /// Bits shift in on clock rising edges and are committed on latch
    /// rising edges. The far register holds the first byte shifted.
    pub fn frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut data = false;
        let mut clock = false;
        let mut latch = false;
        let mut chain = 0u16;

        for &(line, level) in self.0.borrow().iter() {
            match line {
                Line::Data => data = level,
                Line::Clock => {
                    if level && !clock {
                        chain = (chain << 1) | data as u16;
                    }
                    clock = level;
                }
                Line::Latch => {
                    if level && !latch {
                        frames.push(Frame {
                            segments: (chain >> 8) as u8,
                            select: chain as u8,
                        });
                    }
                    latch = level;
                }
            }
        }
        frames
    }
}

/// Output pin that appends to a [`BusLog`]
pub struct MockPin {
    line: Line,
    log: BusLog,
}

impl MockPin {
    fn new(line: Line, log: BusLog) -> Self {
        Self { line, log }
    }

    pub fn line(&self) -> Line {
        self.line
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.log.0.borrow_mut().push((self.line, true));
    }

    fn set_low(&mut self) {
        self.log.0.borrow_mut().push((self.line, false));
    }
}

/// Pin provider with 30 GPIOs, each handed out once
///
/// Pins are assigned to lines in request order: data, clock, latch.
pub struct MockProvider {
    pub log: BusLog,
    taken: BTreeSet<u8>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            log: BusLog::new(),
            taken: BTreeSet::new(),
        }
    }

    pub fn taken(&self) -> usize {
        self.taken.len()
    }
}

impl PinProvider for MockProvider {
    type Pin = MockPin;

    fn output(&mut self, pin: u8) -> Result<MockPin, PinError> {
        if pin > 29 {
            return Err(PinError::InvalidPin);
        }
        if !self.taken.insert(pin) {
            return Err(PinError::AlreadyTaken);
        }
        let line = match self.taken.len() {
            1 => Line::Data,
            2 => Line::Clock,
            _ => Line::Latch,
        };
        Ok(MockPin::new(line, self.log.clone()))
    }
}
