//! Status responses sent back over the transport
//!
//! The session produces structured [`Response`] values; the transport turns
//! them into text with [`Response::render`], which never exceeds
//! [`MAX_RESPONSE_LEN`] bytes. Long pattern lists are truncated, never
//! overflowed.

use core::fmt::{self, Write};
use heapless::{String, Vec};

/// Maximum rendered response length in bytes
pub const MAX_RESPONSE_LEN: usize = 128;

/// Maximum number of pattern identifiers carried in one response
pub const MAX_LISTED_PATTERNS: usize = 32;

/// What the session expects next, used in "ignored" responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expected {
    Weight,
    Pattern,
    Duration,
    Completion,
}

/// Status response for one input event (or an asynchronous notification)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Actuator boot has not completed; no input is processed
    NotInitialized,
    /// Weight accepted; these pattern identifiers are compatible
    PatternsAvailable {
        patterns: Vec<u8, MAX_LISTED_PATTERNS>,
    },
    /// No catalog entry matches the weight
    NoPatterns { weight: u8 },
    /// Pattern accepted
    PatternSelected { pattern: u8 },
    /// Pattern is not in the candidate set of the latest weight
    PatternUnavailable { pattern: u8 },
    /// Duration accepted, playback armed
    ActivityStarted { seconds: u8 },
    /// Duration of zero seconds
    DurationRejected,
    /// Input kind does not match the current phase
    Ignored { state: u8, expected: Expected },
    /// Playback finished (asynchronous notification)
    ActivityEnded,
    /// Value failed boundary validation
    InvalidValue,
}

impl Response {
    /// Render into a bounded text buffer, truncating if necessary
    pub fn render(&self) -> String<MAX_RESPONSE_LEN> {
        let mut text = String::new();
        let mut writer = Truncating { buf: &mut text };
        // Truncating never reports an error
        let _ = write!(writer, "{}", self);
        text
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::NotInitialized => f.write_str(
                "The controller is not initialized. Please try again later. \
                 If issue persists, please restart the device!",
            ),
            Response::PatternsAvailable { patterns } => {
                f.write_str("Available patterns are: ")?;
                for (i, id) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", id)?;
                }
                f.write_str(".")
            }
            Response::NoPatterns { weight } => {
                write!(f, "No patterns available for {}.", weight)
            }
            Response::PatternSelected { pattern } => {
                write!(f, "Pattern {} will be used!", pattern)
            }
            Response::PatternUnavailable { .. } => f.write_str(
                "The received pattern is not available for specified weight. Try again.",
            ),
            Response::ActivityStarted { seconds } => {
                write!(f, "Activity started! It will last for {} seconds!", seconds)
            }
            Response::DurationRejected => {
                f.write_str("Activity time must be at least 1 second. Try again.")
            }
            Response::Ignored { state, expected } => {
                write!(f, "The received value is ignored in state {}. ", state)?;
                f.write_str(match expected {
                    Expected::Weight => "Please enter the actuator weight.",
                    Expected::Pattern => "Please enter the vibration pattern.",
                    Expected::Duration => "Please enter wanted activity time in seconds.",
                    Expected::Completion => {
                        "Please wait for activity to end or send reset signal."
                    }
                })
            }
            Response::ActivityEnded => {
                f.write_str("Activity time ended. Please enter the specifications again!")
            }
            Response::InvalidValue => f.write_str("Invalid value received"),
        }
    }
}

/// `fmt::Write` adapter that silently drops whatever does not fit
struct Truncating<'a, const N: usize> {
    buf: &'a mut String<N>,
}

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
