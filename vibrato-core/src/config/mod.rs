//! Configuration types
//!
//! Actuator electrical parameters and boot options, parsed from a small
//! TOML subset so the firmware can embed a human-editable `haptic.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
