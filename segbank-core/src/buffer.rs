//! Display buffer composition
//!
//! Turns a text like `"-1.25"` into one segment byte per digit. A `'.'`
//! does not take a digit of its own: it lights the decimal point of the
//! digit before it.

use heapless::Vec;

use crate::encoding::Segments;
use crate::error::{ConfigIssue, DisplayError};
use crate::MAX_DIGITS;

/// Segment bytes for one render, leftmost digit first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    digits: Vec<Segments, MAX_DIGITS>,
}

impl DisplayBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { digits: Vec::new() }
    }

    /// Build the buffer for `sequence` on a bank of `num_displays` digits
    ///
    /// - `start_at` blank digits are placed before the text.
    /// - A `'.'` lights the decimal point of the previous digit. A `'.'`
    ///   at the start of the text, or with no digit before it, is ignored.
    ///
    /// Errors are reported in text order: whichever comes first, an
    /// unsupported character or the digit that does not fit, is returned.
    /// `required` in an overflow counts every non-`'.'` character, supported
    /// or not. Nothing is drawn on error; this function has no side effects.
    pub fn compose(
        sequence: &str,
        start_at: usize,
        num_displays: usize,
    ) -> Result<Self, DisplayError> {
        check_num_displays(num_displays)?;

        if start_at > num_displays {
            return Err(DisplayError::DisplayOverflow {
                required: required_digits(sequence, start_at),
                available: num_displays,
            });
        }

        let mut buffer = Self::new();
        for _ in 0..start_at {
            buffer.push(Segments::BLANK, sequence, start_at, num_displays)?;
        }

        for (position, c) in sequence.chars().enumerate() {
            if c == '.' {
                if position > 0 {
                    if let Some(last) = buffer.digits.last_mut() {
                        *last = last.with_decimal_point();
                    }
                }
                continue;
            }

            let segments = Segments::from_char(c).ok_or(DisplayError::UnsupportedCharacter {
                character: c,
                position,
            })?;
            buffer.push(segments, sequence, start_at, num_displays)?;
        }

        Ok(buffer)
    }

    fn push(
        &mut self,
        segments: Segments,
        sequence: &str,
        start_at: usize,
        num_displays: usize,
    ) -> Result<(), DisplayError> {
        if self.digits.len() >= num_displays {
            return Err(DisplayError::DisplayOverflow {
                required: required_digits(sequence, start_at),
                available: num_displays,
            });
        }
        // Capacity is MAX_DIGITS and num_displays <= MAX_DIGITS
        self.digits
            .push(segments)
            .map_err(|_| DisplayError::InvalidConfiguration(ConfigIssue::TooManyDisplays))
    }

    /// Number of digits in the buffer
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Segment pattern of digit `index`
    pub fn get(&self, index: usize) -> Option<Segments> {
        self.digits.get(index).copied()
    }

    /// All digits, leftmost first
    pub fn as_slice(&self) -> &[Segments] {
        &self.digits
    }

    /// Iterate over digits, leftmost first
    pub fn iter(&self) -> impl Iterator<Item = Segments> + '_ {
        self.digits.iter().copied()
    }
}

/// Check a digit count against what one select register can address
pub fn check_num_displays(num_displays: usize) -> Result<(), ConfigIssue> {
    if num_displays == 0 {
        Err(ConfigIssue::NoDisplays)
    } else if num_displays > MAX_DIGITS {
        Err(ConfigIssue::TooManyDisplays)
    } else {
        Ok(())
    }
}

/// Digits `sequence` would occupy after `start_at` padding
///
/// Every character except `'.'` takes a digit, whether or not it can be
/// encoded.
pub fn required_digits(sequence: &str, start_at: usize) -> usize {
    start_at + sequence.chars().filter(|&c| c != '.').count()
}
