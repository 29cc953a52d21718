//! Configuration loading
//!
//! The configuration is compiled in from `display.toml`. build.rs already
//! rejects a bad file, so the fallback here only guards against a parser
//! mismatch between host and target builds.

use defmt::*;

use segbank_core::config::{parse_config, DisplayConfig, WiringOrder};

/// Parse the embedded configuration, falling back to defaults
pub fn load(source: &str) -> DisplayConfig {
    match parse_config(source) {
        Ok(config) => {
            info!("Loaded display.toml");
            config
        }
        Err(e) => {
            warn!("display.toml rejected ({}), using defaults", e);
            DisplayConfig::default()
        }
    }
}

/// Log what the firmware is about to drive
pub fn log_config_summary(config: &DisplayConfig) {
    let wiring = match &config.wiring {
        WiringOrder::Reversed => "reversed",
        WiringOrder::Direct => "direct",
        WiringOrder::Table(_) => "table",
    };
    info!(
        "Display: {} digits, {} wiring, {} passes/refresh, clear_after={}",
        config.num_displays, wiring, config.redraw_count, config.clear_after
    );
    info!(
        "Bus pins: data=gpio{}, clock=gpio{}, latch=gpio{}",
        config.pins.data, config.pins.clock, config.pins.latch
    );
    debug!("Message: {}", config.message.as_str());
}
