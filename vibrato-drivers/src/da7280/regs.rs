//! DA7280 register map
//!
//! Only the registers the driver touches are listed. Field masks follow the
//! read-modify-write convention of [`RegisterBus::write_field`]: set bits
//! are *kept*, clear bits are replaced by the new value.
//!
//! [`RegisterBus::write_field`]: super::RegisterBus::write_field

/// Fixed 7-bit I2C address
pub const DEFAULT_ADDRESS: u8 = 0x4A;

/// Expected content of [`CHIP_REV`]
pub const CHIP_REVISION: u8 = 0xBA;

/// Chip revision
pub const CHIP_REV: u8 = 0x00;
/// Latched interrupt events (write one to clear)
pub const IRQ_EVENT1: u8 = 0x03;
/// Warning diagnostics
pub const IRQ_EVENT_WARN_DIAG: u8 = 0x04;
/// Sequencer diagnostics
pub const IRQ_EVENT_SEQ_DIAG: u8 = 0x05;
/// Live interrupt status
pub const IRQ_STATUS1: u8 = 0x06;
/// Interrupt mask
pub const IRQ_MASK1: u8 = 0x07;
/// Control interface; bit 7 locks the memory pointer
pub const CIF_I2C1: u8 = 0x08;
/// LRA period, bits 14..7
pub const FRQ_LRA_PER_H: u8 = 0x0A;
/// LRA period, bits 6..0
pub const FRQ_LRA_PER_L: u8 = 0x0B;
/// Nominal (RMS) drive voltage
pub const ACTUATOR1: u8 = 0x0C;
/// Absolute (peak) drive voltage
pub const ACTUATOR2: u8 = 0x0D;
/// Current limit in bits 4..0
pub const ACTUATOR3: u8 = 0x0E;
/// Voltage-to-current factor, high byte
pub const CALIB_V2I_H: u8 = 0x0F;
/// Voltage-to-current factor, low byte
pub const CALIB_V2I_L: u8 = 0x10;
/// Measured impedance adjustment, high part
pub const CALIB_IMP_H: u8 = 0x11;
/// Measured impedance adjustment, low part
pub const CALIB_IMP_L: u8 = 0x12;
/// Actuator type and feature switches
pub const TOP_CFG1: u8 = 0x13;
/// Full-brake threshold
pub const TOP_CFG2: u8 = 0x14;
/// Calibration switches
pub const TOP_CFG4: u8 = 0x16;
/// Back-EMF sensitivity
pub const TOP_INT_CFG1: u8 = 0x17;
/// Operation mode and memory playback
pub const TOP_CTL1: u8 = 0x22;
/// Direct-override vibration level
pub const TOP_CTL2: u8 = 0x23;
/// Sequence id and repetitions
pub const SEQ_CTL2: u8 = 0x28;
/// First waveform memory register
pub const NUM_SNIPPETS: u8 = 0x84;

/// Size of the waveform memory window in bytes
pub const WAVEFORM_MEMORY_LEN: usize = 100;

/// A masked bit range within one register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub register: u8,
    /// Bits to keep on write
    pub keep: u8,
    pub offset: u8,
}

impl Field {
    pub const fn new(register: u8, keep: u8, offset: u8) -> Self {
        Self {
            register,
            keep,
            offset,
        }
    }

    /// Extract this field from a register value
    pub const fn get(&self, value: u8) -> u8 {
        (value & !self.keep) >> self.offset
    }
}

pub const AMP_PID_EN: Field = Field::new(TOP_CFG1, 0xFE, 0);
pub const RAPID_STOP_EN: Field = Field::new(TOP_CFG1, 0xFD, 1);
pub const ACCELERATION_EN: Field = Field::new(TOP_CFG1, 0xFB, 2);
pub const FREQ_TRACK_EN: Field = Field::new(TOP_CFG1, 0xF7, 3);
pub const BEMF_FAULT_LIM: Field = Field::new(TOP_CFG1, 0xEF, 4);
pub const ACTUATOR_TYPE: Field = Field::new(TOP_CFG1, 0xDF, 5);
pub const FULL_BRAKE_THR: Field = Field::new(TOP_CFG2, 0xF0, 0);
pub const TST_CALIB_IMPEDANCE_DIS: Field = Field::new(TOP_CFG4, 0xBF, 6);
pub const V2I_FACTOR_FREEZE: Field = Field::new(TOP_CFG4, 0x7F, 7);
pub const BEMF_SENSE: Field = Field::new(TOP_INT_CFG1, 0xFC, 0);
pub const OPERATION_MODE: Field = Field::new(TOP_CTL1, 0xF8, 0);
pub const MEM_PLAY: Field = Field::new(TOP_CTL1, 0xEF, 4);
pub const IMAX: Field = Field::new(ACTUATOR3, 0xE0, 0);
pub const LRA_PER_L: Field = Field::new(FRQ_LRA_PER_L, 0x80, 0);
pub const SEQ_ID: Field = Field::new(SEQ_CTL2, 0xF0, 0);
pub const SEQ_LOOP: Field = Field::new(SEQ_CTL2, 0x0F, 4);
pub const MEM_LOCK: Field = Field::new(CIF_I2C1, 0x7F, 7);
