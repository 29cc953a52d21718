//! Build script for segbank-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use segbank_core::DisplayBuffer;
use serde::Deserialize;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Layout of display.toml
///
/// Only used to reject misspelled sections and keys with a readable
/// message; values are checked by the firmware's own parser below.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct ConfigFile {
    display: Option<DisplaySection>,
    pins: Option<PinsSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct DisplaySection {
    digits: Option<u8>,
    wiring: Option<Wiring>,
    redraw_count: Option<u32>,
    clear_after: Option<bool>,
    self_test: Option<bool>,
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum Wiring {
    Named(String),
    Table(Vec<u8>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct PinsSection {
    data: Option<PinValue>,
    clock: Option<PinValue>,
    latch: Option<PinValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum PinValue {
    Name(String),
    Number(u8),
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a display.toml configuration file.          ║\n\
            ║  Please create one in the segbank-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // TOML syntax and key names
    if let Err(e) = toml::from_str::<ConfigFile>(&content) {
        fail("Invalid display.toml", &e.to_string());
    }

    // Values, exactly as the firmware will see them at boot
    let config = match segbank_core::config::parse_config(&content) {
        Ok(config) => config,
        Err(e) => fail("display.toml rejected by config parser", &format!("{:?}", e)),
    };

    // The message must be showable on the configured bank
    if let Err(e) = DisplayBuffer::compose(config.message.as_str(), 0, config.num_displays as usize)
    {
        fail(
            "message cannot be shown on this display",
            &format!("{:?}: {}", config.message.as_str(), e),
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
