//! Board-agnostic core logic for the haptic firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Actuator abstraction trait ([`traits::HapticActuator`])
//! - Pattern catalog (weight class → vibration timelines)
//! - Input interpretation state machine
//! - Playback engine (timer-driven, with a blocking runner)
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod playback;
pub mod state;
pub mod traits;
