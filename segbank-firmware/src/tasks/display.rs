//! Display refresh task
//!
//! The bank only shows text while passes are running, so this task keeps
//! the CPU busy with refresh batches of `redraw_count` passes and yields
//! between batches.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Delay;

use segbank_core::config::{DisplayConfig, WiringOrder};
use segbank_core::MultiplexedDisplay;
use segbank_drivers::SegmentDisplayController;
use segbank_hal_rp2040::RpOutput;

/// Controller type driven by the firmware
pub type Display = SegmentDisplayController<RpOutput, RpOutput, RpOutput, WiringOrder>;

/// Display task - runs the optional self-test, then refreshes the message
#[embassy_executor::task]
pub async fn display_task(mut display: Display, config: DisplayConfig) {
    info!("Display task started");

    display.clear();

    if config.self_test {
        info!("Self-test starting");
        // Blocking delays: nothing else needs the core during boot
        match display.test(&mut Delay) {
            Ok(()) => info!("Self-test finished"),
            Err(e) => {
                error!("Self-test failed: {}", e);
                display.clear();
            }
        }
    }

    let message = config.message.as_str();
    let buffer = match display.compose(message, 0) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("Cannot show {=str}: {}", message, e);
            display.clear();
            return;
        }
    };
    debug!("Showing {=str} on {} digits", message, buffer.len());

    loop {
        if let Err(e) = display.show_buffer(&buffer, config.redraw_count) {
            error!("Refresh failed: {}", e);
            display.clear();
            return;
        }
        if config.clear_after {
            display.clear();
        }
        yield_now().await;
    }
}
