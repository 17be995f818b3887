//! Hardware abstraction traits
//!
//! These traits define the interface between the session logic and the
//! actuator driver. The DA7280 implementation lives in `vibrato-drivers`.

pub mod actuator;

pub use actuator::HapticActuator;
