//! DA7280 errors

/// Setter input that failed range validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    AbsoluteVoltage,
    NominalVoltage,
    MaxCurrent,
    Impedance,
    ResonantFrequency,
    OperationMode,
    FullBrake,
    BemfSensitivity,
    SequenceId,
    Repetitions,
    BlockLength,
}

/// DA7280 driver errors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Da7280Error<E> {
    /// I2C transfer failed
    Bus(E),
    /// Value outside the setter's domain; nothing was sent
    InvalidParameter { parameter: Parameter, value: f32 },
    /// Chip revision register did not identify a DA7280
    UnsupportedChip { revision: u8 },
}

impl<E> Da7280Error<E> {
    pub(crate) fn invalid(parameter: Parameter, value: impl Into<f32>) -> Self {
        Da7280Error::InvalidParameter {
            parameter,
            value: value.into(),
        }
    }

    /// Rejected before any bus traffic
    pub fn is_validation(&self) -> bool {
        matches!(self, Da7280Error::InvalidParameter { .. })
    }

    /// Transfer failure reported by the bus
    pub fn is_bus(&self) -> bool {
        matches!(self, Da7280Error::Bus(_))
    }
}

impl<E> From<E> for Da7280Error<E> {
    fn from(e: E) -> Self {
        Da7280Error::Bus(e)
    }
}
