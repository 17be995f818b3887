//! Configuration loading
//!
//! The actuator configuration is compiled into the firmware from
//! `haptic.toml` and parsed at boot by the core config parser.

pub mod loader;

pub use loader::load;
