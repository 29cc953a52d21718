//! Simple TOML parser for display configuration
//!
//! This is a minimal line-based parser for the subset of TOML used by
//! `display.toml`. It does NOT support all of TOML.
//!
//! Supported features:
//! - `[display]` and `[pins]` section headers
//! - Key = value pairs (string, integer, boolean, integer array)
//! - Comments (# ...)
//!
//! Example:
//!
//! ```toml
//! [display]
//! digits = 4
//! wiring = "reversed"     # or "direct", or [1, 0, 3, 2]
//! redraw_count = 100
//! clear_after = false
//! self_test = true
//! message = "-1.25"
//!
//! [pins]
//! data = "gpio18"
//! clock = "gpio21"
//! latch = "gpio20"
//! ```

use heapless::Vec;

use super::types::{DisplayConfig, WiringOrder};
use crate::error::ConfigIssue;
use crate::wiring::Table;
use crate::MAX_DIGITS;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Message does not fit the config buffer
    MessageTooLong,
    /// Values parse but describe an unusable bank
    Invalid(ConfigIssue),
}

impl From<ConfigIssue> for ParseError {
    fn from(issue: ConfigIssue) -> Self {
        ParseError::Invalid(issue)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Pins,
}

/// Parse TOML configuration into a validated [`DisplayConfig`]
///
/// Keys that are not present keep their [`DisplayConfig::default`] value.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "pins" => Ok(Section::Pins),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Display, "digits") => config.num_displays = parse_int(value)?,
        (Section::Display, "wiring") => config.wiring = parse_wiring(value)?,
        (Section::Display, "redraw_count") => config.redraw_count = parse_int(value)?,
        (Section::Display, "clear_after") => config.clear_after = parse_bool(value)?,
        (Section::Display, "self_test") => config.self_test = parse_bool(value)?,
        (Section::Display, "message") => {
            config.message.clear();
            config
                .message
                .push_str(parse_string(value)?)
                .map_err(|_| ParseError::MessageTooLong)?;
        }
        (Section::Pins, "data") => config.pins.data = parse_pin(value)?,
        (Section::Pins, "clock") => config.pins.clock = parse_pin(value)?,
        (Section::Pins, "latch") => config.pins.latch = parse_pin(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse a quoted string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin like `"gpio18"` or a bare GPIO number
///
/// Bus pins cannot be inverted, so `!` and `^` modifiers are rejected.
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    if let Ok(pin) = value.parse::<u8>() {
        return Ok(pin);
    }
    let s = parse_string(value).map_err(|_| ParseError::InvalidPin)?;
    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    num.parse().map_err(|_| ParseError::InvalidPin)
}

/// Parse `"reversed"`, `"direct"` or an integer array `[1, 0, 3, 2]`
fn parse_wiring(value: &str) -> Result<WiringOrder, ParseError> {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let mut positions: Vec<u8, MAX_DIGITS> = Vec::new();
        for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            positions
                .push(parse_int(item)?)
                .map_err(|_| ConfigIssue::TooManyDisplays)?;
        }
        return Ok(WiringOrder::Table(Table::new(&positions)?));
    }

    match parse_string(value)? {
        "reversed" => Ok(WiringOrder::Reversed),
        "direct" => Ok(WiringOrder::Direct),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BusPins;

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config(""), Ok(DisplayConfig::default()));
    }

    #[test]
    fn test_full_config() {
        let input = r#"
# Four digit module on the left header
[display]
digits = 4
wiring = "direct"
redraw_count = 250   # roughly a quarter second
clear_after = false
self_test = true
message = "-1.25"

[pins]
data = "gpio2"
clock = "gpio3"
latch = 4
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.num_displays, 4);
        assert_eq!(config.wiring, WiringOrder::Direct);
        assert_eq!(config.redraw_count, 250);
        assert!(!config.clear_after);
        assert!(config.self_test);
        assert_eq!(config.message.as_str(), "-1.25");
        assert_eq!(
            config.pins,
            BusPins {
                data: 2,
                clock: 3,
                latch: 4
            }
        );
    }

    #[test]
    fn test_wiring_table() {
        let input = "[display]\ndigits = 4\nwiring = [1, 0, 3, 2]\n";
        let config = parse_config(input).unwrap();
        assert_eq!(
            config.wiring,
            WiringOrder::Table(Table::new(&[1, 0, 3, 2]).unwrap())
        );
    }

    #[test]
    fn test_wiring_table_length_mismatch() {
        let input = "[display]\ndigits = 8\nwiring = [1, 0, 3, 2]\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Invalid(ConfigIssue::WiringLength))
        );
    }

    #[test]
    fn test_wiring_table_not_permutation() {
        let input = "[display]\ndigits = 2\nwiring = [1, 1]\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Invalid(ConfigIssue::WiringNotPermutation))
        );
    }

    #[test]
    fn test_hash_inside_message() {
        let input = "[display]\nmessage = \"#1\" # comment\n";
        // '#' is not displayable, but the parser keeps it
        let config = parse_config(input).unwrap();
        assert_eq!(config.message.as_str(), "#1");
    }

    #[test]
    fn test_too_many_digits() {
        let input = "[display]\ndigits = 9\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Invalid(ConfigIssue::TooManyDisplays))
        );
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(parse_config("[stepper]\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[display]\nbrightness = 3\n"),
            Err(ParseError::UnknownKey)
        );
        // Keys outside any section
        assert_eq!(parse_config("digits = 4\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[display]\ndigits = four\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nclear_after = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nwiring = \"diagonal\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nmessage = HELLO\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[display]\ndigits\n"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_invalid_pins() {
        assert_eq!(
            parse_config("[pins]\ndata = \"!gpio4\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[pins]\ndata = \"pin4\"\n"),
            Err(ParseError::InvalidPin)
        );
    }

    #[test]
    fn test_pin_conflict() {
        let input = "[pins]\ndata = \"gpio5\"\nclock = \"gpio5\"\nlatch = \"gpio6\"\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Invalid(ConfigIssue::PinConflict))
        );
    }

    #[test]
    fn test_message_too_long() {
        let input = "[display]\nmessage = \"0123456789012345678901234567890123\"\n";
        assert_eq!(parse_config(input), Err(ParseError::MessageTooLong));
    }
}
