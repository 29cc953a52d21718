//! Bus outputs on RP2040 GPIO
//!
//! embassy-rp push-pull outputs implement `embedded-hal` 1.0 with an
//! infallible error type, so the shared adapter covers them.

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;
use segbank_hal::EhOutput;

/// Push-pull output driving one bus line
pub type RpOutput = EhOutput<Output<'static>>;

/// Configure a pin as a bus output, initially low
///
/// Low is the idle level of both clocks.
pub fn bus_output(pin: Peri<'static, AnyPin>) -> RpOutput {
    EhOutput::new(Output::new(pin, Level::Low))
}
