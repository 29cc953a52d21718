//! Display driver trait for multiplexed seven-segment banks

use crate::error::DisplayError;

/// Default number of refresh passes per render
pub const DEFAULT_REDRAW_COUNT: u32 = 100;

/// How a render call drives the bank
///
/// Perceived on-screen time is controlled by `redraw_count` alone; there is
/// no wall-clock timing, so the same count lasts longer on a slower host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderOptions {
    /// Full refresh passes over every digit (0 draws nothing)
    pub redraw_count: u32,
    /// Blank the bank after the last pass
    pub clear_after: bool,
    /// Blank digits placed before the text
    pub start_at: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            redraw_count: DEFAULT_REDRAW_COUNT,
            clear_after: true,
            start_at: 0,
        }
    }
}

impl RenderOptions {
    /// Options with the default redraw count, clearing afterwards
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of refresh passes
    pub fn redraw_count(mut self, count: u32) -> Self {
        self.redraw_count = count;
        self
    }

    /// Set whether to blank the bank afterwards
    pub fn clear_after(mut self, clear: bool) -> Self {
        self.clear_after = clear;
        self
    }

    /// Set the number of leading blank digits
    pub fn start_at(mut self, digits: usize) -> Self {
        self.start_at = digits;
        self
    }
}

/// Trait for multiplexed display banks
///
/// Every call runs to completion before returning. Implementations own
/// their bus pins exclusively.
pub trait MultiplexedDisplay {
    /// Number of physical digits
    fn num_displays(&self) -> usize;

    /// Blank every digit
    fn clear(&mut self);

    /// Render `sequence` with explicit options
    ///
    /// Invalid input is reported before anything is written to the bus.
    fn render_with(&mut self, sequence: &str, options: RenderOptions) -> Result<(), DisplayError>;

    /// Render `sequence` with [`RenderOptions::default`]
    fn render(&mut self, sequence: &str) -> Result<(), DisplayError> {
        self.render_with(sequence, RenderOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.redraw_count, 100);
        assert!(opts.clear_after);
        assert_eq!(opts.start_at, 0);
    }

    #[test]
    fn test_builder() {
        let opts = RenderOptions::new()
            .redraw_count(5)
            .clear_after(false)
            .start_at(2);
        assert_eq!(
            opts,
            RenderOptions {
                redraw_count: 5,
                clear_after: false,
                start_at: 2,
            }
        );
    }

    /// Display that records what it was asked to do
    struct Recorder {
        last: Option<RenderOptions>,
        clears: u32,
    }

    impl MultiplexedDisplay for Recorder {
        fn num_displays(&self) -> usize {
            4
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn render_with(&mut self, _sequence: &str, options: RenderOptions) -> Result<(), DisplayError> {
            self.last = Some(options);
            Ok(())
        }
    }

    #[test]
    fn test_render_uses_defaults() {
        let mut display = Recorder {
            last: None,
            clears: 0,
        };
        display.render("1234").unwrap();
        assert_eq!(display.last, Some(RenderOptions::default()));
        assert_eq!(display.clears, 0);
    }
}
