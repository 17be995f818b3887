//! DA7280 configuration API
//!
//! Typed setters and getters over [`RegisterBus`]. Every setter validates
//! its input before touching the bus, so a rejected value never causes a
//! transfer. Getters always read the device; nothing is cached.

use vibrato_core::config::{ActuatorSettings, HapticConfig, MotorType, OperationMode};
use vibrato_core::traits::HapticActuator;
use vibrato_hal::I2cBus;

use super::bus::RegisterBus;
use super::error::{Da7280Error, Parameter};
use super::regs::{self, WAVEFORM_MEMORY_LEN};
use super::status::{IrqEvents, IrqStatus, SequenceDiag};

/// Volts per LSB of `ACTUATOR1`/`ACTUATOR2`
pub const VOLTAGE_STEP: f32 = 0.0234;
/// Current limit offset at register value 0
pub const IMAX_OFFSET_MA: f32 = 28.6;
/// Milliamps per LSB of the current limit field
pub const IMAX_STEP_MA: f32 = 7.2;
/// Divisor of the V2I factor
pub const V2I_DIVISOR: f32 = 1.6104;
/// LRA period resolution in seconds
pub const LRA_PERIOD_STEP_S: f32 = 1333.32e-9;
/// Full-brake threshold percent per LSB
pub const FULL_BRAKE_STEP_PCT: f32 = 6.66;

const MAX_ABSOLUTE_VOLTAGE: f32 = 6.0;
const MAX_NOMINAL_VOLTAGE: f32 = 3.3;
const MAX_CURRENT_MA: f32 = 300.0;
const MAX_IMPEDANCE_OHM: f32 = 50.0;
const MAX_FREQUENCY_HZ: f32 = 500.0;

/// Largest level accepted while acceleration is on
const ACCELERATED_MAX_LEVEL: u8 = 0x7F;

/// Back-EMF sensitivity settings in mV
const BEMF_MV: [f32; 4] = [0.0, 4.9, 27.9, 49.9];

/// Convert a voltage into an `ACTUATOR1`/`ACTUATOR2` value
pub fn voltage_to_register(volts: f32) -> u8 {
    let scaled = (volts / VOLTAGE_STEP + 0.5) as u32;
    scaled.min(0xFF) as u8
}

/// Convert a current limit into the `ACTUATOR3` field
pub fn current_to_register(milliamps: f32) -> u8 {
    let scaled = ((milliamps - IMAX_OFFSET_MA) / IMAX_STEP_MA) as u32;
    scaled.min(0x1F) as u8
}

/// V2I factor for an impedance at a given current limit field
pub fn v2i_factor(impedance_ohm: f32, imax_register: u8) -> u16 {
    (impedance_ohm * f32::from(u16::from(imax_register) + 4) / V2I_DIVISOR) as u16
}

/// LRA period register value for a resonant frequency (15 bits)
pub fn lra_period(frequency_hz: f32) -> u16 {
    let period = (1.0 / (frequency_hz * LRA_PERIOD_STEP_S)) as u32;
    period.min(0x7FFF) as u16
}

/// Map an intensity percentage onto `0..=full_scale`
///
/// `full_scale` is `0xFF`, or `0x7F` while acceleration is on.
pub fn percent_to_level(percent: u8, full_scale: u8) -> u8 {
    (u16::from(percent.min(100)) * u16::from(full_scale) / 100) as u8
}

/// Build a waveform-memory frame command byte
///
/// `gain` is 3 bits, `time_base` 2 bits and `snippet_id` 3 bits; higher bits
/// are dropped.
pub fn frame_command(gain: u8, time_base: u8, snippet_id: u8) -> u8 {
    ((gain & 0x07) << 5) | ((time_base & 0x03) << 3) | (snippet_id & 0x07)
}

fn check_range<E>(parameter: Parameter, value: f32, max: f32) -> Result<(), Da7280Error<E>> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(Da7280Error::invalid(parameter, value))
    }
}

/// DA7280 haptic driver
pub struct Da7280<B> {
    regs: RegisterBus<B>,
}

impl<B: I2cBus> Da7280<B> {
    pub fn new(bus: B) -> Self {
        Self {
            regs: RegisterBus::new(bus),
        }
    }

    /// Raw register access
    pub fn registers(&mut self) -> &mut RegisterBus<B> {
        &mut self.regs
    }

    pub fn release(self) -> B {
        self.regs.release()
    }

    // Identity

    pub fn chip_revision(&mut self) -> Result<u8, Da7280Error<B::Error>> {
        self.regs.read(regs::CHIP_REV)
    }

    /// Verify the device answers with the DA7280 chip revision
    pub fn check_chip(&mut self) -> Result<(), Da7280Error<B::Error>> {
        match self.chip_revision()? {
            regs::CHIP_REVISION => Ok(()),
            revision => Err(Da7280Error::UnsupportedChip { revision }),
        }
    }

    // Actuator parameters

    pub fn set_actuator_type(&mut self, motor: MotorType) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::ACTUATOR_TYPE, motor.bits())
    }

    pub fn actuator_type(&mut self) -> Result<MotorType, Da7280Error<B::Error>> {
        Ok(match self.regs.read_field(regs::ACTUATOR_TYPE)? {
            0 => MotorType::Lra,
            _ => MotorType::Erm,
        })
    }

    /// Peak drive voltage, 0.0-6.0 V
    pub fn set_absolute_voltage(&mut self, volts: f32) -> Result<(), Da7280Error<B::Error>> {
        check_range::<B::Error>(Parameter::AbsoluteVoltage, volts, MAX_ABSOLUTE_VOLTAGE)?;
        self.regs
            .write_register(regs::ACTUATOR2, voltage_to_register(volts))
    }

    pub fn absolute_voltage(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        Ok(f32::from(self.regs.read(regs::ACTUATOR2)?) * VOLTAGE_STEP)
    }

    /// RMS drive voltage, 0.0-3.3 V
    pub fn set_nominal_voltage(&mut self, volts: f32) -> Result<(), Da7280Error<B::Error>> {
        check_range::<B::Error>(Parameter::NominalVoltage, volts, MAX_NOMINAL_VOLTAGE)?;
        self.regs
            .write_register(regs::ACTUATOR1, voltage_to_register(volts))
    }

    pub fn nominal_voltage(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        Ok(f32::from(self.regs.read(regs::ACTUATOR1)?) * VOLTAGE_STEP)
    }

    /// Current limit, 0-300 mA
    pub fn set_max_current(&mut self, milliamps: f32) -> Result<(), Da7280Error<B::Error>> {
        check_range::<B::Error>(Parameter::MaxCurrent, milliamps, MAX_CURRENT_MA)?;
        self.regs
            .write(regs::IMAX, current_to_register(milliamps))
    }

    pub fn max_current_ma(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        let imax = self.regs.read_field(regs::IMAX)?;
        Ok(f32::from(imax) * IMAX_STEP_MA + IMAX_OFFSET_MA)
    }

    /// Coil impedance, 0-50 Ω
    ///
    /// The V2I factor depends on the current limit, so set the current
    /// limit first.
    pub fn set_impedance(&mut self, ohms: f32) -> Result<(), Da7280Error<B::Error>> {
        check_range::<B::Error>(Parameter::Impedance, ohms, MAX_IMPEDANCE_OHM)?;
        let imax = self.regs.read_field(regs::IMAX)?;
        let [high, low] = v2i_factor(ohms, imax).to_be_bytes();
        self.regs.write_register(regs::CALIB_V2I_L, low)?;
        self.regs.write_register(regs::CALIB_V2I_H, high)
    }

    pub fn impedance(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        let high = self.regs.read(regs::CALIB_V2I_H)?;
        let low = self.regs.read(regs::CALIB_V2I_L)?;
        let imax = self.regs.read_field(regs::IMAX)?;
        let v2i = u16::from_be_bytes([high, low]);
        Ok(f32::from(v2i) * V2I_DIVISOR / f32::from(imax + 4))
    }

    /// Impedance measured by the device, in ohms
    pub fn impedance_adjustment(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        let high = self.regs.read(regs::CALIB_IMP_H)?;
        let low = self.regs.read(regs::CALIB_IMP_L)?;
        Ok(f32::from(high) * 0.25 + f32::from(low) * 0.0625)
    }

    /// LRA resonant frequency, up to 500 Hz
    pub fn set_resonant_frequency(&mut self, hertz: f32) -> Result<(), Da7280Error<B::Error>> {
        check_range::<B::Error>(Parameter::ResonantFrequency, hertz, MAX_FREQUENCY_HZ)?;
        if hertz == 0.0 {
            return Err(Da7280Error::invalid(Parameter::ResonantFrequency, hertz));
        }
        let period = lra_period(hertz);
        self.regs
            .write_register(regs::FRQ_LRA_PER_H, (period >> 7) as u8)?;
        self.regs.write(regs::LRA_PER_L, (period & 0x7F) as u8)
    }

    pub fn resonant_frequency(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        let high = self.regs.read(regs::FRQ_LRA_PER_H)?;
        let low = self.regs.read_field(regs::LRA_PER_L)?;
        let period = u32::from(high) << 7 | u32::from(low);
        if period == 0 {
            return Ok(0.0);
        }
        Ok(1.0 / (period as f32 * LRA_PERIOD_STEP_S))
    }

    /// Write all actuator parameters in dependency order
    ///
    /// Stops at the first failure; earlier writes are not rolled back.
    pub fn configure(&mut self, settings: &ActuatorSettings) -> Result<(), Da7280Error<B::Error>> {
        self.set_actuator_type(settings.motor_type)?;
        self.set_absolute_voltage(settings.absolute_voltage)?;
        self.set_nominal_voltage(settings.nominal_voltage)?;
        self.set_max_current(settings.max_current_ma)?;
        self.set_impedance(settings.impedance_ohm)?;
        self.set_resonant_frequency(settings.resonant_frequency_hz)
    }

    /// Read the actuator parameters back, as quantised by the device
    pub fn settings(&mut self) -> Result<ActuatorSettings, Da7280Error<B::Error>> {
        Ok(ActuatorSettings {
            motor_type: self.actuator_type()?,
            nominal_voltage: self.nominal_voltage()?,
            absolute_voltage: self.absolute_voltage()?,
            max_current_ma: self.max_current_ma()?,
            impedance_ohm: self.impedance()?,
            resonant_frequency_hz: self.resonant_frequency()?,
        })
    }

    // Operation

    /// Select the operation mode
    ///
    /// Edge-triggered waveform memory needs GPI wiring this driver does not
    /// configure, so it is rejected.
    pub fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), Da7280Error<B::Error>> {
        if mode == OperationMode::Etwm {
            return Err(Da7280Error::invalid(Parameter::OperationMode, mode.bits()));
        }
        self.regs.write(regs::OPERATION_MODE, mode.bits())
    }

    /// Current operation mode; `None` for a reserved encoding
    pub fn operation_mode(&mut self) -> Result<Option<OperationMode>, Da7280Error<B::Error>> {
        Ok(OperationMode::from_bits(
            self.regs.read_field(regs::OPERATION_MODE)?,
        ))
    }

    /// Set the direct-override vibration level
    ///
    /// Capped at half scale while acceleration is enabled.
    pub fn set_vibration(&mut self, level: u8) -> Result<(), Da7280Error<B::Error>> {
        let level = if self.acceleration_enabled()? {
            level.min(ACCELERATED_MAX_LEVEL)
        } else {
            level
        };
        self.regs.write_register(regs::TOP_CTL2, level)
    }

    pub fn vibration(&mut self) -> Result<u8, Da7280Error<B::Error>> {
        self.regs.read(regs::TOP_CTL2)
    }

    // Feature switches

    pub fn enable_frequency_tracking(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::FREQ_TRACK_EN, u8::from(enable))
    }

    pub fn enable_acceleration(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::ACCELERATION_EN, u8::from(enable))
    }

    pub fn acceleration_enabled(&mut self) -> Result<bool, Da7280Error<B::Error>> {
        Ok(self.regs.read_field(regs::ACCELERATION_EN)? != 0)
    }

    pub fn enable_rapid_stop(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::RAPID_STOP_EN, u8::from(enable))
    }

    pub fn enable_amp_pid(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::AMP_PID_EN, u8::from(enable))
    }

    pub fn set_bemf_fault_limit(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::BEMF_FAULT_LIM, u8::from(enable))
    }

    pub fn enable_v2i_factor_freeze(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::V2I_FACTOR_FREEZE, u8::from(enable))
    }

    pub fn calibrate_impedance_distance(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs
            .write(regs::TST_CALIB_IMPEDANCE_DIS, u8::from(enable))
    }

    /// Switch features for a coin ERM
    pub fn enable_coin_erm(&mut self) -> Result<(), Da7280Error<B::Error>> {
        self.enable_acceleration(false)?;
        self.enable_rapid_stop(false)?;
        self.enable_amp_pid(false)?;
        self.enable_v2i_factor_freeze(true)?;
        self.calibrate_impedance_distance(true)?;
        self.set_bemf_fault_limit(true)
    }

    /// Full-brake threshold, 0-15
    pub fn set_full_brake(&mut self, threshold: u8) -> Result<(), Da7280Error<B::Error>> {
        if threshold > 15 {
            return Err(Da7280Error::invalid(Parameter::FullBrake, threshold));
        }
        self.regs.write(regs::FULL_BRAKE_THR, threshold)
    }

    /// Full-brake threshold in percent
    pub fn full_brake_percent(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        Ok(f32::from(self.regs.read_field(regs::FULL_BRAKE_THR)?) * FULL_BRAKE_STEP_PCT)
    }

    /// Back-EMF sensitivity setting, 0-3
    pub fn set_bemf_sensitivity(&mut self, setting: u8) -> Result<(), Da7280Error<B::Error>> {
        if setting > 3 {
            return Err(Da7280Error::invalid(Parameter::BemfSensitivity, setting));
        }
        self.regs.write(regs::BEMF_SENSE, setting)
    }

    /// Back-EMF sensitivity in mV
    pub fn bemf_sensitivity_mv(&mut self) -> Result<f32, Da7280Error<B::Error>> {
        let setting = self.regs.read_field(regs::BEMF_SENSE)?;
        Ok(BEMF_MV[usize::from(setting)])
    }

    // Interrupts

    pub fn set_irq_mask(&mut self, mask: u8) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write_register(regs::IRQ_MASK1, mask)
    }

    pub fn irq_mask(&mut self) -> Result<u8, Da7280Error<B::Error>> {
        self.regs.read(regs::IRQ_MASK1)
    }

    pub fn irq_events(&mut self) -> Result<IrqEvents, Da7280Error<B::Error>> {
        Ok(IrqEvents::from_register(self.regs.read(regs::IRQ_EVENT1)?))
    }

    pub fn sequence_diag(&mut self) -> Result<SequenceDiag, Da7280Error<B::Error>> {
        Ok(SequenceDiag::from_register(
            self.regs.read(regs::IRQ_EVENT_SEQ_DIAG)?,
        ))
    }

    pub fn irq_status(&mut self) -> Result<IrqStatus, Da7280Error<B::Error>> {
        Ok(IrqStatus::from_register(self.regs.read(regs::IRQ_STATUS1)?))
    }

    /// Acknowledge latched events
    ///
    /// `IRQ_EVENT1` is write-one-to-clear, so only the given events are
    /// written; events not listed stay latched.
    pub fn clear_irq(&mut self, events: IrqEvents) -> Result<(), Da7280Error<B::Error>> {
        self.regs
            .write_register(regs::IRQ_EVENT1, events.to_register())
    }

    // Waveform memory

    pub fn play_from_memory(&mut self, enable: bool) -> Result<(), Da7280Error<B::Error>> {
        self.regs.write(regs::MEM_PLAY, u8::from(enable))
    }

    /// Sequence to play and how often, each 0-15
    pub fn set_sequence_control(
        &mut self,
        repetitions: u8,
        sequence_id: u8,
    ) -> Result<(), Da7280Error<B::Error>> {
        if sequence_id > 15 {
            return Err(Da7280Error::invalid(Parameter::SequenceId, sequence_id));
        }
        if repetitions > 15 {
            return Err(Da7280Error::invalid(Parameter::Repetitions, repetitions));
        }
        self.regs.write(regs::SEQ_ID, sequence_id)?;
        self.regs.write(regs::SEQ_LOOP, repetitions)
    }

    /// Zero the whole waveform memory window
    pub fn erase_waveform_memory(&mut self) -> Result<(), Da7280Error<B::Error>> {
        self.regs
            .write_memory(regs::NUM_SNIPPETS, &[0; WAVEFORM_MEMORY_LEN])
    }

    // Boot

    /// Bring the device up
    ///
    /// Chip check, actuator parameters, operation mode, feature switches,
    /// then intensity 0. Any failure aborts the sequence; calling again
    /// repeats it from the start.
    pub fn boot(&mut self, config: &HapticConfig) -> Result<(), Da7280Error<B::Error>> {
        self.check_chip()?;
        self.configure(&config.actuator)?;
        self.set_operation_mode(config.boot.operation_mode)?;
        self.enable_frequency_tracking(config.features.frequency_tracking)?;
        self.enable_acceleration(config.features.acceleration)?;
        self.enable_rapid_stop(config.features.rapid_stop)?;
        self.set_vibration(0)
    }
}

impl<B: I2cBus> HapticActuator for Da7280<B> {
    type Error = Da7280Error<B::Error>;

    /// Percent of the level range the device currently allows
    fn set_intensity(&mut self, percent: u8) -> Result<(), Self::Error> {
        let full_scale = if self.acceleration_enabled()? {
            ACCELERATED_MAX_LEVEL
        } else {
            u8::MAX
        };
        self.regs
            .write_register(regs::TOP_CTL2, percent_to_level(percent, full_scale))
    }
}
