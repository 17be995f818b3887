//! Input kinds and value parsing
//!
//! Every input event is a `(value, kind)` pair. The kind says which
//! characteristic the value was written to; the value is decimal ASCII text
//! that must fit in a `u8`.

use core::fmt::Write;
use heapless::String;

/// Which characteristic an input value arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputKind {
    /// Actuator weight class
    Weight,
    /// Pattern identifier (catalog index)
    Pattern,
    /// Activity duration in seconds
    Duration,
}

impl InputKind {
    /// Parse a serial-transport keyword (case-insensitive)
    pub fn from_keyword(keyword: &[u8]) -> Option<Self> {
        if keyword.eq_ignore_ascii_case(b"weight") {
            Some(InputKind::Weight)
        } else if keyword.eq_ignore_ascii_case(b"pattern") {
            Some(InputKind::Pattern)
        } else if keyword.eq_ignore_ascii_case(b"duration") {
            Some(InputKind::Duration)
        } else {
            None
        }
    }

    /// Serial-transport keyword for this kind
    pub fn keyword(self) -> &'static str {
        match self {
            InputKind::Weight => "weight",
            InputKind::Pattern => "pattern",
            InputKind::Duration => "duration",
        }
    }
}

/// Mapping from opaque transport tokens (GATT characteristic handles) to kinds
///
/// The handles are assigned by the transport's database, so they are
/// configuration rather than protocol constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TokenMap {
    pub weight: u16,
    pub pattern: u16,
    pub duration: u16,
}

impl TokenMap {
    /// Resolve a token to an input kind, `None` for unrelated characteristics
    pub fn kind_of(&self, token: u16) -> Option<InputKind> {
        if token == self.weight {
            Some(InputKind::Weight)
        } else if token == self.pattern {
            Some(InputKind::Pattern)
        } else if token == self.duration {
            Some(InputKind::Duration)
        } else {
            None
        }
    }
}

/// A validated input event, ready for the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputCommand {
    pub kind: InputKind,
    pub value: u8,
}

/// Reasons a value is rejected at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueError {
    /// No digits at all
    Empty,
    /// Anything other than `0-9` (signs, whitespace, trailing junk)
    InvalidDigit { byte: u8 },
    /// Value does not fit in a `u8`
    Overflow,
}

/// Parse a decimal ASCII value into a `u8`
///
/// Only digits are accepted: no sign, no surrounding whitespace, no
/// trailing characters. Leading zeros are allowed.
pub fn parse_value(text: &[u8]) -> Result<u8, ValueError> {
    if text.is_empty() {
        return Err(ValueError::Empty);
    }

    let mut value: u8 = 0;
    for &byte in text {
        if !byte.is_ascii_digit() {
            return Err(ValueError::InvalidDigit { byte });
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(byte - b'0'))
            .ok_or(ValueError::Overflow)?;
    }

    Ok(value)
}

/// Format a value the way [`parse_value`] expects it
pub fn format_value(value: u8) -> String<3> {
    let mut text = String::new();
    // Three digits always fit
    let _ = write!(text, "{}", value);
    text
}
