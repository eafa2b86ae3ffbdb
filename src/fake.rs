//! In-memory stand-in for a Pinnacle sensor, used by the unit tests.
//!
//! Emulates the RAP register file, the ERA value/address/control handshake
//! and the self-clearing calibration bit, and records every SPI transaction.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::{Operation, SpiDevice};

use crate::reg::{FILLER, READ_MASK, REGISTER_COUNT, WRITE_MASK};
use crate::{Config, Pinnacle, SensorId};

const EXT_SIZE: usize = 0x400;
const ERA_VALUE: usize = 0x1B;
const ERA_HIGH: usize = 0x1C;
const ERA_LOW: usize = 0x1D;
const ERA_CONTROL: usize = 0x1E;
const CAL_CONFIG_1: usize = 0x07;

pub(crate) type FakePinnacle = Pinnacle<FakeSensor, FakePin, FakeDelay>;

pub(crate) fn device() -> FakePinnacle {
  device_with(Config::default())
}

pub(crate) fn device_with(config: Config) -> FakePinnacle {
  Pinnacle::new(FakeSensor::default(), FakePin::default(), FakeDelay::default(), SensorId(0), config)
}

/// Bytes clocked out during one chip-select window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
  pub tx: Vec<u8>,
}

impl Frame {
  pub fn new(tx: &[u8]) -> Self {
    Self { tx: tx.to_vec() }
  }
}

pub(crate) struct FakeSensor {
  pub regs: [u8; REGISTER_COUNT],
  pub ext: Vec<u8>,
  /// Polls a busy flag answers "busy" before clearing.
  pub busy_polls: u8,
  /// Busy flags never clear.
  pub stuck: bool,
  /// Nothing on the bus: MISO floats high and writes go nowhere.
  pub absent: bool,
  /// Index of the transaction that fails with [`BusFault`].
  pub fail_at: Option<usize>,
  /// Transactions attempted, failed ones included.
  pub transactions: usize,
  pub frames: Vec<Frame>,
  pub writes: Vec<(u8, u8)>,
  era_busy: u8,
  cal_busy: u8,
}

impl Default for FakeSensor {
  fn default() -> Self {
    Self {
      regs: [0; REGISTER_COUNT],
      ext: vec![0; EXT_SIZE],
      busy_polls: 2,
      stuck: false,
      absent: false,
      fail_at: None,
      transactions: 0,
      frames: Vec::new(),
      writes: Vec::new(),
      era_busy: 0,
      cal_busy: 0,
    }
  }
}

impl FakeSensor {
  /// Values written to `addr`, in order.
  pub fn writes_to(&self, addr: u8) -> Vec<u8> {
    self.writes.iter().filter(|(a, _)| *a == addr).map(|(_, v)| *v).collect()
  }

  fn era_address(&self) -> usize {
    u16::from_be_bytes([self.regs[ERA_HIGH], self.regs[ERA_LOW]]) as usize
  }

  fn set_era_address(&mut self, addr: usize) {
    let [hi, lo] = (addr as u16).to_be_bytes();
    self.regs[ERA_HIGH] = hi;
    self.regs[ERA_LOW] = lo;
  }

  fn clock(&mut self, tx: &mut Vec<u8>, byte: u8) -> u8 {
    let pos = tx.len();
    tx.push(byte);
    if self.absent {
      return 0xFF;
    }
    match tx[0] & 0xE0 {
      READ_MASK if pos >= 3 => self.read_reg((tx[0] & 0x1F) as usize + pos - 3),
      _ => FILLER,
    }
  }

  fn finish(&mut self, tx: &[u8]) {
    if !self.absent && tx.len() >= 2 && tx[0] & 0xE0 == WRITE_MASK {
      self.write_reg((tx[0] & 0x1F) as usize, tx[1]);
    }
  }

  fn read_reg(&mut self, addr: usize) -> u8 {
    match addr {
      ERA_CONTROL if self.regs[ERA_CONTROL] != 0 => {
        if self.stuck || self.era_busy > 0 {
          self.era_busy = self.era_busy.saturating_sub(1);
        } else {
          self.regs[ERA_CONTROL] = 0;
        }
      }
      CAL_CONFIG_1 if self.regs[CAL_CONFIG_1] & 0x01 != 0 => {
        if self.stuck || self.cal_busy > 0 {
          self.cal_busy = self.cal_busy.saturating_sub(1);
        } else {
          self.regs[CAL_CONFIG_1] &= !0x01;
        }
      }
      _ => {}
    }
    self.regs.get(addr).copied().unwrap_or(0)
  }

  fn write_reg(&mut self, addr: usize, value: u8) {
    self.writes.push((addr as u8, value));
    self.regs[addr] = value;

    match addr {
      ERA_CONTROL => {
        let mut era = self.era_address();
        if value & 0x01 != 0 {
          self.regs[ERA_VALUE] = self.ext.get(era).copied().unwrap_or(0);
        }
        if value & 0x02 != 0 {
          if let Some(slot) = self.ext.get_mut(era) {
            *slot = self.regs[ERA_VALUE];
          }
        }
        if value & 0x04 != 0 {
          era += 1;
          self.set_era_address(era);
        }
        self.era_busy = self.busy_polls;
      }
      CAL_CONFIG_1 if value & 0x01 != 0 => self.cal_busy = self.busy_polls,
      _ => {}
    }
  }
}

/// Transport failure injected through [`FakeSensor::fail_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusFault;

impl embedded_hal::spi::Error for BusFault {
  fn kind(&self) -> embedded_hal::spi::ErrorKind {
    embedded_hal::spi::ErrorKind::Other
  }
}

impl embedded_hal::spi::ErrorType for FakeSensor {
  type Error = BusFault;
}

impl SpiDevice<u8> for FakeSensor {
  async fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), BusFault> {
    let index = self.transactions;
    self.transactions += 1;
    if self.fail_at == Some(index) {
      return Err(BusFault);
    }

    let mut tx = Vec::new();
    for op in operations.iter_mut() {
      match op {
        Operation::Write(buf) => {
          for &b in buf.iter() {
            self.clock(&mut tx, b);
          }
        }
        Operation::TransferInPlace(buf) => {
          for b in buf.iter_mut() {
            *b = self.clock(&mut tx, *b);
          }
        }
        Operation::Read(buf) => {
          for b in buf.iter_mut() {
            *b = self.clock(&mut tx, 0x00);
          }
        }
        Operation::Transfer(read, write) => {
          for (i, &w) in write.iter().enumerate() {
            let r = self.clock(&mut tx, w);
            if let Some(slot) = read.get_mut(i) {
              *slot = r;
            }
          }
        }
        Operation::DelayNs(_) => {}
      }
    }
    self.finish(&tx);
    self.frames.push(Frame { tx });
    Ok(())
  }
}

#[derive(Default)]
pub(crate) struct FakePin {
  pub high: bool,
  pub waits: usize,
  /// Every read and wait fails with [`PinFault`].
  pub broken: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PinFault;

impl embedded_hal::digital::Error for PinFault {
  fn kind(&self) -> embedded_hal::digital::ErrorKind {
    embedded_hal::digital::ErrorKind::Other
  }
}

impl embedded_hal::digital::ErrorType for FakePin {
  type Error = PinFault;
}

impl FakePin {
  fn level(&self) -> Result<bool, PinFault> {
    if self.broken {
      Err(PinFault)
    } else {
      Ok(self.high)
    }
  }

  fn settle(&mut self, high: bool) -> Result<(), PinFault> {
    self.waits += 1;
    if self.broken {
      return Err(PinFault);
    }
    self.high = high;
    Ok(())
  }
}

impl InputPin for FakePin {
  fn is_high(&mut self) -> Result<bool, PinFault> {
    self.level()
  }

  fn is_low(&mut self) -> Result<bool, PinFault> {
    self.level().map(|high| !high)
  }
}

impl Wait for FakePin {
  async fn wait_for_high(&mut self) -> Result<(), PinFault> {
    self.settle(true)
  }

  async fn wait_for_low(&mut self) -> Result<(), PinFault> {
    self.settle(false)
  }

  async fn wait_for_rising_edge(&mut self) -> Result<(), PinFault> {
    self.settle(true)
  }

  async fn wait_for_falling_edge(&mut self) -> Result<(), PinFault> {
    self.settle(false)
  }

  async fn wait_for_any_edge(&mut self) -> Result<(), PinFault> {
    let high = !self.high;
    self.settle(high)
  }
}

#[derive(Default)]
pub(crate) struct FakeDelay {
  elapsed_ns: u64,
}

impl FakeDelay {
  pub fn elapsed_us(&self) -> u64 {
    self.elapsed_ns / 1_000
  }
}

impl DelayNs for FakeDelay {
  async fn delay_ns(&mut self, ns: u32) {
    self.elapsed_ns += u64::from(ns);
  }
}
