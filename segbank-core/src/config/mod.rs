//! Configuration types
//!
//! Board-agnostic configuration for one display bank, plus a parser for
//! the small TOML subset used by `display.toml`.

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
