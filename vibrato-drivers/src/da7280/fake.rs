//! In-memory DA7280 stand-in for tests

use vibrato_hal::I2cBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Write(u8, Vec<u8>),
    WriteRead(u8, u8),
}

/// 256-byte register file with auto-incrementing writes
pub struct FakeBus {
    pub regs: [u8; 256],
    pub log: Vec<Transfer>,
    /// Index of the transfer that fails
    pub fail_at: Option<usize>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            log: Vec::new(),
            fail_at: None,
        }
    }

    /// Fake with the chip revision register populated
    pub fn da7280() -> Self {
        let mut bus = Self::new();
        bus.regs[0x00] = 0xBA;
        bus
    }

    pub fn writes(&self) -> usize {
        self.log
            .iter()
            .filter(|t| matches!(t, Transfer::Write(..)))
            .count()
    }

    fn should_fail(&self) -> bool {
        self.fail_at == Some(self.log.len() - 1)
    }
}

impl I2cBus for FakeBus {
    type Error = FakeError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), FakeError> {
        self.log.push(Transfer::Write(address, data.to_vec()));
        if self.should_fail() {
            return Err(FakeError);
        }
        if let Some((&start, payload)) = data.split_first() {
            for (i, &b) in payload.iter().enumerate() {
                self.regs[(usize::from(start) + i) % 256] = b;
            }
        }
        Ok(())
    }

    fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), FakeError> {
        Err(FakeError)
    }

    fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), FakeError> {
        let register = write_data.first().copied().unwrap_or(0);
        self.log.push(Transfer::WriteRead(address, register));
        if self.should_fail() {
            return Err(FakeError);
        }
        for (i, b) in read_buf.iter_mut().enumerate() {
            *b = self.regs[(usize::from(register) + i) % 256];
        }
        Ok(())
    }
}
