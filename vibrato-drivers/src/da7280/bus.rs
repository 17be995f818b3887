//! Register access layer
//!
//! Every operation is one or two blocking I2C transactions against the
//! device. Nothing is cached: a failed transfer leaves the register in an
//! unknown state and it is up to the caller to retry.

use vibrato_hal::I2cBus;

use super::error::{Da7280Error, Parameter};
use super::regs::{self, Field};

/// Largest block accepted by [`RegisterBus::write_block`]
pub const MAX_BLOCK_LEN: usize = regs::WAVEFORM_MEMORY_LEN;

/// Byte-addressed register space of one device
pub struct RegisterBus<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> RegisterBus<B> {
    /// Register bus at the DA7280's fixed address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, regs::DEFAULT_ADDRESS)
    }

    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    /// Read a single register
    pub fn read(&mut self, register: u8) -> Result<u8, Da7280Error<B::Error>> {
        let mut buf = [0u8; 1];
        self.bus.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Read one field, shifted down to bit 0
    pub fn read_field(&mut self, field: Field) -> Result<u8, Da7280Error<B::Error>> {
        Ok(field.get(self.read(field.register)?))
    }

    /// Read-modify-write
    ///
    /// Bits set in `mask` keep their current value, the rest are cleared
    /// before `value << bit_offset` is OR-ed in. A mask of `0x00` replaces
    /// the whole register.
    pub fn write_field(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
        bit_offset: u8,
    ) -> Result<(), Da7280Error<B::Error>> {
        let current = self.read(register)?;
        let updated = (current & mask) | (value << bit_offset);
        self.bus.write(self.address, &[register, updated])?;
        Ok(())
    }

    /// [`write_field`](Self::write_field) for a named field
    pub fn write(&mut self, field: Field, value: u8) -> Result<(), Da7280Error<B::Error>> {
        self.write_field(field.register, field.keep, value, field.offset)
    }

    /// Overwrite a whole register
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Da7280Error<B::Error>> {
        self.write_field(register, 0x00, value, 0)
    }

    /// Write consecutive registers starting at `start` in one transfer
    pub fn write_block(&mut self, start: u8, data: &[u8]) -> Result<(), Da7280Error<B::Error>> {
        if data.len() > MAX_BLOCK_LEN {
            return Err(Da7280Error::invalid(
                Parameter::BlockLength,
                data.len() as f32,
            ));
        }

        let mut buf = [0u8; MAX_BLOCK_LEN + 1];
        buf[0] = start;
        buf[1..=data.len()].copy_from_slice(data);
        self.bus.write(self.address, &buf[..=data.len()])?;
        Ok(())
    }

    /// Block write into waveform memory
    ///
    /// The memory pointer is unlocked for the transfer and locked again
    /// afterwards, whether or not the transfer succeeded.
    pub fn write_memory(&mut self, start: u8, data: &[u8]) -> Result<(), Da7280Error<B::Error>> {
        let transfer = self
            .write(regs::MEM_LOCK, 0)
            .and_then(|()| self.write_block(start, data));
        let relock = self.write(regs::MEM_LOCK, 1);
        transfer.and(relock)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{FakeBus, Transfer};
    use super::*;

    #[test]
    fn test_read() {
        let mut bus = FakeBus::new();
        bus.regs[0x00] = 0xBA;
        let mut regs = RegisterBus::new(&mut bus);
        assert_eq!(regs.read(0x00), Ok(0xBA));
        assert_eq!(bus.log, [Transfer::WriteRead(0x4A, 0x00)]);
    }

    #[test]
    fn test_write_field_keeps_masked_bits() {
        let mut bus = FakeBus::new();
        bus.regs[0x13] = 0b1010_1010;
        let mut regs = RegisterBus::new(&mut bus);

        // Set bit 2, keep everything else
        regs.write_field(0x13, 0xFB, 1, 2).unwrap();
        assert_eq!(bus.regs[0x13], 0b1010_1110);
        assert_eq!(
            bus.log.last(),
            Some(&Transfer::Write(0x4A, vec![0x13, 0b1010_1110]))
        );
    }

    #[test]
    fn test_write_field_mask_zero_replaces() {
        let mut bus = FakeBus::new();
        bus.regs[0x0D] = 0xFF;
        RegisterBus::new(&mut bus).write_field(0x0D, 0x00, 0x3E, 0).unwrap();
        assert_eq!(bus.regs[0x0D], 0x3E);
    }

    #[test]
    fn test_read_failure_skips_write() {
        let mut bus = FakeBus::new();
        bus.fail_at = Some(0);
        let err = RegisterBus::new(&mut bus).write_field(0x13, 0xFB, 1, 2);
        assert!(err.unwrap_err().is_bus());
        assert_eq!(bus.log.len(), 1);
        assert_eq!(bus.regs[0x13], 0);
    }

    #[test]
    fn test_write_block_single_transfer() {
        let mut bus = FakeBus::new();
        RegisterBus::new(&mut bus)
            .write_block(0x84, &[1, 2, 3])
            .unwrap();
        assert_eq!(bus.log, [Transfer::Write(0x4A, vec![0x84, 1, 2, 3])]);
        assert_eq!(&bus.regs[0x84..0x87], &[1, 2, 3]);
    }

    #[test]
    fn test_write_block_too_long() {
        let mut bus = FakeBus::new();
        let err = RegisterBus::new(&mut bus)
            .write_block(0x84, &[0; MAX_BLOCK_LEN + 1])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(bus.log.is_empty());
    }

    #[test]
    fn test_write_memory_relocks_on_failure() {
        let mut bus = FakeBus::new();
        bus.regs[0x08] = 0x80;
        // unlock = read + write, block transfer is the third transfer
        bus.fail_at = Some(2);
        let err = RegisterBus::new(&mut bus).write_memory(0x84, &[0; 4]);
        assert!(err.unwrap_err().is_bus());
        assert_eq!(bus.regs[0x08] & 0x80, 0x80);
        assert_eq!(
            bus.log.last(),
            Some(&Transfer::Write(0x4A, vec![0x08, 0x80]))
        );
    }

    #[test]
    fn test_write_memory_sequence() {
        let mut bus = FakeBus::new();
        bus.regs[0x08] = 0x80;
        RegisterBus::new(&mut bus).write_memory(0x84, &[7]).unwrap();
        assert_eq!(
            bus.log,
            [
                Transfer::WriteRead(0x4A, 0x08),
                Transfer::Write(0x4A, vec![0x08, 0x00]),
                Transfer::Write(0x4A, vec![0x84, 7]),
                Transfer::WriteRead(0x4A, 0x08),
                Transfer::Write(0x4A, vec![0x08, 0x80]),
            ]
        );
    }
}
