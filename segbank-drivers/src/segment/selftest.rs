//! Power-on self-test pattern
//!
//! Walks the bank through patterns that make wiring faults obvious to the
//! eye: each select line alone, every line at once, both halves, then a
//! fast counter that shows ghosting if the refresh loop is too slow.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;
use segbank_core::{DigitMap, DisplayError, MultiplexedDisplay, RenderOptions, Segments, MAX_DIGITS};
use segbank_hal::OutputPin;

use super::SegmentDisplayController;

const EIGHT: Segments = match Segments::from_char('8') {
    Some(s) => s,
    None => Segments::ALL_LIT,
};

/// Refresh passes for each held pattern
const HOLD_PASSES: u32 = 500;

const SINGLE_DIGIT_MS: u32 = 500;
const ALL_DIGITS_MS: u32 = 1000;
const BLANK_MS: u32 = 200;

/// Counter bound for a bank of `num_displays` digits
///
/// The counter has to fit with its sign, and never runs past three digits.
pub(crate) fn counter_limit(num_displays: usize) -> i32 {
    if num_displays >= 4 {
        999
    } else {
        10i32.pow(num_displays as u32 - 1) - 1
    }
}

/// Counter text for one pass
///
/// Banks of 4 digits or more repeat the value in every whole group of
/// four, so each digit is exercised. The result is right-aligned to the
/// bank width.
pub(crate) fn counter_text(value: i32, num_displays: usize) -> String<MAX_DIGITS> {
    let mut groups: String<MAX_DIGITS> = String::new();
    if num_displays < 4 {
        let _ = write!(groups, "{}", value);
    } else {
        for _ in 0..num_displays / 4 {
            let _ = write!(groups, "{:>4}", value);
        }
    }

    let mut text = String::new();
    let _ = write!(text, "{:>width$}", groups.as_str(), width = num_displays);
    text
}

impl<D, C, L, M> SegmentDisplayController<D, C, L, M>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    M: DigitMap,
{
    /// Run the visual self-test
    ///
    /// Single digits and the all-on frame are driven with raw select bits,
    /// so they light in select-line order regardless of wiring. The counter
    /// runs over every digit (see [`counter_text`]). Takes a few seconds;
    /// `delay` supplies the holds between steps.
    pub fn test<T: DelayNs>(&mut self, delay: &mut T) -> Result<(), DisplayError> {
        let n = self.num_displays;

        for i in 0..n {
            self.set_port(EIGHT.bits(), 1 << i);
            delay.delay_ms(SINGLE_DIGIT_MS);
        }

        let all_on = ((1u16 << n) - 1) as u8;
        self.set_port(EIGHT.bits(), all_on);
        delay.delay_ms(ALL_DIGITS_MS);
        self.clear();
        delay.delay_ms(BLANK_MS);

        let mut eights: String<MAX_DIGITS> = String::new();
        for _ in 0..n {
            let _ = eights.push('8');
        }
        let hold = RenderOptions::new().redraw_count(HOLD_PASSES);
        self.render_with(&eights, hold)?;

        let half = n / 2;
        self.render_with(&eights[..half], hold)?;
        self.render_with(&eights[..half], hold.start_at(half))?;

        let limit = counter_limit(n);
        let once = RenderOptions::new().redraw_count(1).clear_after(false);
        for value in -limit..=limit {
            self.render_with(&counter_text(value, n), once)?;
        }

        self.clear();
        let done = if n >= 4 { "dOnE" } else { "d" };
        self.render_with(done, hold)?;
        self.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusLog, Frame, MockPin};
    use segbank_core::encoding::encode;

    #[derive(Default)]
    struct RecordingDelay {
        calls: std::vec::Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls.push(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.calls.push(ms);
        }
    }

    fn controller(n: usize) -> (BusLog, SegmentDisplayController<MockPin, MockPin, MockPin>) {
        let log = BusLog::new();
        let (d, c, l) = log.pins();
        (log, SegmentDisplayController::new(d, c, l, n).unwrap())
    }

    #[test]
    fn test_counter_limit() {
        assert_eq!(counter_limit(1), 0);
        assert_eq!(counter_limit(2), 9);
        assert_eq!(counter_limit(3), 99);
        assert_eq!(counter_limit(4), 999);
        assert_eq!(counter_limit(8), 999);
    }

    #[test]
    fn test_self_test_four_digits() {
        let (log, mut display) = controller(4);
        let mut delay = RecordingDelay::default();
        display.test(&mut delay).unwrap();

        assert_eq!(delay.calls, [500, 500, 500, 500, 1000, 200]);

        let frames = log.frames();
        let eight = encode('8').unwrap();

        // Raw select lines in order, then all at once
        assert_eq!(
            frames[..5],
            [
                Frame { segments: eight, select: 0b0001 },
                Frame { segments: eight, select: 0b0010 },
                Frame { segments: eight, select: 0b0100 },
                Frame { segments: eight, select: 0b1000 },
                Frame { segments: eight, select: 0b1111 },
            ]
        );

        // Render clears, then one more clear
        let tail = &frames[frames.len() - 8..];
        assert!(tail.iter().all(|f| f.segments == 0xFF));

        // "dOnE" held before both clears
        let done = &frames[frames.len() - 12..frames.len() - 8];
        assert_eq!(done[0], Frame { segments: encode('d').unwrap(), select: 0b1000 });
        assert_eq!(done[3], Frame { segments: encode('E').unwrap(), select: 0b0001 });
    }

    #[test]
    fn test_self_test_frame_count() {
        let (log, mut display) = controller(4);
        display.test(&mut RecordingDelay::default()).unwrap();

        let n = 4;
        let singles = n + 1 + n;
        let all_eights = 500 * n + n;
        // Right half is drawn with its two padding blanks
        let halves = (500 * 2 + n) + (500 * 4 + n);
        // "-999" .. " 999": each value fills all four digits
        let counter = 1999 * n;
        let done = n + 500 * 4 + n + n;
        assert_eq!(
            log.frames().len(),
            singles + all_eights + halves + counter + done
        );
    }

    #[test]
    fn test_self_test_two_digits() {
        let (log, mut display) = controller(2);
        let mut delay = RecordingDelay::default();
        display.test(&mut delay).unwrap();
        assert_eq!(delay.calls.len(), 2 + 2);

        let frames = log.frames();
        assert_eq!(frames[2], Frame { segments: encode('8').unwrap(), select: 0b11 });

        // "d" on the leftmost digit before the two clears
        let d = frames[frames.len() - 5];
        assert_eq!(d, Frame { segments: encode('d').unwrap(), select: 0b10 });
    }

    #[test]
    fn test_counter_text() {
        assert_eq!(counter_text(0, 1).as_str(), "0");
        assert_eq!(counter_text(-9, 2).as_str(), "-9");
        assert_eq!(counter_text(5, 3).as_str(), "  5");
        assert_eq!(counter_text(-999, 4).as_str(), "-999");
        assert_eq!(counter_text(7, 4).as_str(), "   7");
        assert_eq!(counter_text(-999, 6).as_str(), "  -999");
        assert_eq!(counter_text(-999, 8).as_str(), "-999-999");
        assert_eq!(counter_text(42, 8).as_str(), "  42  42");
    }

    #[test]
    fn test_counter_fills_eight_digits() {
        let (log, mut display) = controller(8);
        display.test(&mut RecordingDelay::default()).unwrap();

        let n = 8;
        let singles = n + 1 + n;
        let all_eights = 500 * n + n;
        let halves = (500 * 4 + n) + (500 * 8 + n);
        let start = singles + all_eights + halves;

        let minus = encode('-').unwrap();
        let nine = encode('9').unwrap();
        let expected: std::vec::Vec<Frame> = [minus, nine, nine, nine, minus, nine, nine, nine]
            .iter()
            .enumerate()
            .map(|(i, &segments)| Frame {
                segments,
                select: 0x80 >> i,
            })
            .collect();

        let frames = log.frames();
        assert_eq!(frames[start..start + n], expected[..]);
    }

    #[test]
    fn test_self_test_single_digit() {
        let (log, mut display) = controller(1);
        display.test(&mut RecordingDelay::default()).unwrap();
        assert_eq!(log.frames().last().map(|f| f.segments), Some(0xFF));
    }
}
