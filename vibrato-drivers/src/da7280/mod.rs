//! DA7280 haptic driver (I2C)
//!
//! The DA7280 drives an LRA or ERM actuator from a handful of byte-wide
//! configuration registers. All configuration goes through masked
//! read-modify-write on [`RegisterBus`]; [`Da7280`] layers typed, validated
//! setters on top and implements [`HapticActuator`] for playback.
//!
//! # Boot sequence
//!
//! 1. Chip revision must read `0xBA`
//! 2. Actuator type, voltages, current limit, impedance, frequency
//! 3. Operation mode (DRO for playback driven from the host)
//! 4. Frequency tracking, acceleration, rapid stop
//! 5. Vibration level 0
//!
//! [`HapticActuator`]: vibrato_core::traits::HapticActuator

mod bus;
mod driver;
mod error;
pub mod regs;
mod status;

#[cfg(test)]
mod fake;

pub use bus::{RegisterBus, MAX_BLOCK_LEN};
pub use driver::{
    current_to_register, frame_command, lra_period, percent_to_level, v2i_factor,
    voltage_to_register, Da7280,
};
pub use error::{Da7280Error, Parameter};
pub use status::{IrqEvents, IrqStatus, SequenceDiag};
