//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in vibrato-core:
//!
//! - Haptic drivers (DA7280 over I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod da7280;
