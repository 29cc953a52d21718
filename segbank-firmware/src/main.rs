//! Segbank - Seven-Segment Display Bank Firmware
//!
//! Firmware for RP2040-based boards driving a bank of multiplexed
//! seven-segment digits through two chained 74HC595 shift registers.
//! Digit count, wiring, bus pins and the message all come from the
//! embedded `display.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use segbank_drivers::SegmentDisplayController;
use segbank_hal_rp2040::PinBank;

mod config;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Pico GPIOs wired to board functions (SMPS mode, VBUS sense, VSYS sense)
const BOARD_RESERVED_PINS: [u8; 3] = [23, 24, 29];

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Segbank firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);
    config::log_config_summary(&config);

    let mut bank = PinBank::from_peripherals(p);
    for pin in BOARD_RESERVED_PINS {
        bank.reserve(pin);
    }

    // Name the offending pin before any is taken
    for (name, pin) in [
        ("data", config.pins.data),
        ("clock", config.pins.clock),
        ("latch", config.pins.latch),
    ] {
        if !bank.is_available(pin) {
            defmt::panic!("{} pin GPIO{} is reserved or out of range", name, pin);
        }
    }

    let display = match SegmentDisplayController::from_pin_numbers_with_wiring(
        &mut bank,
        config.pins.data,
        config.pins.clock,
        config.pins.latch,
        config.num_displays as usize,
        config.wiring.clone(),
    ) {
        Ok(display) => display,
        Err(e) => defmt::panic!("Display setup failed: {}", e),
    };
    info!("Display initialized");

    spawner.spawn(tasks::display_task(display, config)).unwrap();
}
