//! Vibrato input/notification protocol
//!
//! This crate is the boundary between the wireless (or serial) transport and
//! the haptic session logic. It owns three things:
//!
//! - **Inputs**: which characteristic a value arrived on ([`InputKind`]) and
//!   the strict decimal parsing of that value ([`parse_value`]).
//! - **Line framing**: the serial stand-in for the GATT characteristics,
//!   one command per line ([`LineParser`]).
//! - **Responses**: the structured status values produced by the session
//!   ([`Response`]) and their bounded text rendering.
//!
//! ```text
//! transport bytes ──► LineParser ──► InputCommand ──► (session)
//!                                                         │
//! transport text  ◄── Response::render ◄── Response ◄─────┘
//! ```
//!
//! Malformed values never get past this crate; the session only ever sees
//! well-formed `(kind, u8)` pairs.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod input;
pub mod line;
pub mod response;

pub use input::{format_value, parse_value, InputCommand, InputKind, TokenMap, ValueError};
pub use line::{LineError, LineParser, MAX_LINE_LEN};
pub use response::{Expected, Response, MAX_LISTED_PATTERNS, MAX_RESPONSE_LEN};
