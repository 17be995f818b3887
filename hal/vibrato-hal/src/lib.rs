//! Vibrato Hardware Abstraction Layer
//!
//! This crate defines the bus traits the haptic driver is written against.
//! Chip-specific HALs plug in either by implementing [`I2cBus`] directly or
//! through the [`EmbeddedHalI2c`] adapter, which wraps any
//! `embedded_hal::i2c::I2c` master.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  vibrato-drivers (DA7280 register API)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vibrato-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embassy-rp / any embedded-hal 1.0 I2C  │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{EmbeddedHalI2c, I2cBus, I2cConfig};
