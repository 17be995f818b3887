//! Configuration type definitions
//!
//! These types describe how the actuator is wired and driven. They are
//! written to the device once during boot; the driver never caches them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Actuator technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotorType {
    /// Linear resonant actuator
    #[default]
    Lra,
    /// Eccentric rotating mass
    Erm,
}

impl MotorType {
    /// Register encoding (`TOP_CFG1.ACTUATOR_TYPE`)
    pub fn bits(self) -> u8 {
        match self {
            MotorType::Lra => 0,
            MotorType::Erm => 1,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lra" => Some(MotorType::Lra),
            "erm" => Some(MotorType::Erm),
            _ => None,
        }
    }
}

/// Driver operation mode (`TOP_CTL1.OPERATION_MODE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperationMode {
    Inactive,
    /// Direct register override: intensity written to `TOP_CTL2`
    #[default]
    Dro,
    /// PWM input
    Pwm,
    /// Register-triggered waveform memory
    Rtwm,
    /// Edge-triggered waveform memory
    Etwm,
}

impl OperationMode {
    pub fn bits(self) -> u8 {
        match self {
            OperationMode::Inactive => 0,
            OperationMode::Dro => 1,
            OperationMode::Pwm => 2,
            OperationMode::Rtwm => 3,
            OperationMode::Etwm => 4,
        }
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(OperationMode::Inactive),
            1 => Some(OperationMode::Dro),
            2 => Some(OperationMode::Pwm),
            3 => Some(OperationMode::Rtwm),
            4 => Some(OperationMode::Etwm),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inactive" => Some(OperationMode::Inactive),
            "dro" => Some(OperationMode::Dro),
            "pwm" => Some(OperationMode::Pwm),
            "rtwm" => Some(OperationMode::Rtwm),
            "etwm" => Some(OperationMode::Etwm),
            _ => None,
        }
    }
}

/// Actuator electrical parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuatorSettings {
    pub motor_type: MotorType,
    /// RMS drive voltage, 0.0-3.3 V
    pub nominal_voltage: f32,
    /// Peak drive voltage, 0.0-6.0 V
    pub absolute_voltage: f32,
    /// Current limit, 0-300 mA
    pub max_current_ma: f32,
    /// Coil impedance, 0-50 Ω
    pub impedance_ohm: f32,
    /// LRA resonant frequency, up to 500 Hz
    pub resonant_frequency_hz: f32,
}

impl Default for ActuatorSettings {
    fn default() -> Self {
        Self {
            motor_type: MotorType::Lra,
            nominal_voltage: 1.4,
            absolute_voltage: 1.45,
            max_current_ma: 213.0,
            impedance_ohm: 8.0,
            resonant_frequency_hz: 80.0,
        }
    }
}

/// Optional driver features switched on after the mandatory boot writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverFeatures {
    pub frequency_tracking: bool,
    /// Halves the usable intensity range while enabled
    pub acceleration: bool,
    pub rapid_stop: bool,
}

impl Default for DriverFeatures {
    fn default() -> Self {
        Self {
            frequency_tracking: true,
            acceleration: true,
            rapid_stop: true,
        }
    }
}

/// Boot behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BootConfig {
    pub operation_mode: OperationMode,
    /// Delay before retrying a failed boot
    pub retry_ms: u32,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            operation_mode: OperationMode::Dro,
            retry_ms: 2000,
        }
    }
}

/// Complete haptic configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HapticConfig {
    pub actuator: ActuatorSettings,
    pub features: DriverFeatures,
    pub boot: BootConfig,
}
