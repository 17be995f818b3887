//! Interrupt and diagnostic registers

/// Latched events from `IRQ_EVENT1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqEvents {
    /// Sequencer waiting to continue
    pub seq_continue: bool,
    /// Supply under-voltage lockout
    pub uvlo: bool,
    /// Sequence finished
    pub seq_done: bool,
    /// Die temperature critical
    pub overtemp_critical: bool,
    /// Sequencer fault, see [`SequenceDiag`]
    pub seq_fault: bool,
    /// Warning, see `IRQ_EVENT_WARN_DIAG`
    pub warning: bool,
    /// Actuator fault
    pub actuator_fault: bool,
    /// Over-current
    pub over_current: bool,
}

impl IrqEvents {
    pub fn from_register(value: u8) -> Self {
        Self {
            seq_continue: value & 0x01 != 0,
            uvlo: value & 0x02 != 0,
            seq_done: value & 0x04 != 0,
            overtemp_critical: value & 0x08 != 0,
            seq_fault: value & 0x10 != 0,
            warning: value & 0x20 != 0,
            actuator_fault: value & 0x40 != 0,
            over_current: value & 0x80 != 0,
        }
    }

    pub fn to_register(&self) -> u8 {
        u8::from(self.seq_continue)
            | u8::from(self.uvlo) << 1
            | u8::from(self.seq_done) << 2
            | u8::from(self.overtemp_critical) << 3
            | u8::from(self.seq_fault) << 4
            | u8::from(self.warning) << 5
            | u8::from(self.actuator_fault) << 6
            | u8::from(self.over_current) << 7
    }

    pub fn is_empty(&self) -> bool {
        self.to_register() == 0
    }

    /// Check if any fault condition is present
    pub fn has_fault(&self) -> bool {
        self.uvlo || self.overtemp_critical || self.seq_fault || self.actuator_fault || self.over_current
    }
}

/// Sequencer diagnostics from `IRQ_EVENT_SEQ_DIAG`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceDiag {
    pub pwm_fault: bool,
    pub mem_fault: bool,
    pub seq_id_fault: bool,
}

impl SequenceDiag {
    pub fn from_register(value: u8) -> Self {
        Self {
            pwm_fault: value & 0x20 != 0,
            mem_fault: value & 0x40 != 0,
            seq_id_fault: value & 0x80 != 0,
        }
    }

    pub fn has_fault(&self) -> bool {
        self.pwm_fault || self.mem_fault || self.seq_id_fault
    }
}

/// Live status from `IRQ_STATUS1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqStatus {
    pub seq_continue: bool,
    /// Supply back above the UVLO threshold
    pub uvlo_vbat_ok: bool,
    pub pattern_done: bool,
    pub overtemp_critical: bool,
    pub pattern_fault: bool,
    pub warning: bool,
    pub actuator: bool,
    pub over_current: bool,
}

impl IrqStatus {
    pub fn from_register(value: u8) -> Self {
        Self {
            seq_continue: value & 0x01 != 0,
            uvlo_vbat_ok: value & 0x02 != 0,
            pattern_done: value & 0x04 != 0,
            overtemp_critical: value & 0x08 != 0,
            pattern_fault: value & 0x10 != 0,
            warning: value & 0x20 != 0,
            actuator: value & 0x40 != 0,
            over_current: value & 0x80 != 0,
        }
    }

    /// Nothing to report
    pub fn is_nominal(&self) -> bool {
        *self == Self::default()
    }
}
