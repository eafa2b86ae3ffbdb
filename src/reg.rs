/******************************************************************************
 * Refer to the Pinnacle ASIC (GP v2.x) datasheet for more information.       *
 * ========================================================================== *
 *               Pinnacle - RAP Registers & Extended Memory Map               *
*******************************************************************************/

use embedded_hal::spi::{Mode, MODE_1};

/// SPI mode expected by the ASIC (CPOL = 0, CPHA = 1, MSB first).
pub const SPI_MODE: Mode = MODE_1;
/// Fastest SPI clock the ASIC accepts.
pub const MAX_SPI_FREQUENCY_HZ: u32 = 13_000_000;

pub(crate) const WRITE_MASK: u8 = 0x80;
pub(crate) const READ_MASK: u8 = 0xA0;
/// Byte clocked out while the ASIC turns the bus around or shifts data back.
pub(crate) const FILLER: u8 = 0xFC;

/// Number of addressable RAP registers (0x00..=0x1F).
pub const REGISTER_COUNT: usize = 32;

/// RAP register file.
#[allow(dead_code)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
  // Identification (0x00..0x01)
  FirmwareId = 0x00,
  FirmwareVersion = 0x01,

  // Status & configuration (0x02..0x09)
  Status1 = 0x02,
  SysConfig1 = 0x03,
  FeedConfig1 = 0x04,
  FeedConfig2 = 0x05,
  FeedConfig3 = 0x06,
  CalConfig1 = 0x07,
  Ps2AuxControl = 0x08,
  SampleRate = 0x09,

  // Idle & power (0x0A..0x0D)
  ZIdle = 0x0A,
  ZScaler = 0x0B,
  /// Time spent asleep before checking for a finger.
  SleepInterval = 0x0C,
  /// Time spent idle before going to sleep.
  SleepTimer = 0x0D,

  Reserved0 = 0x0E,
  Reserved1 = 0x0F,
  Reserved2 = 0x10,
  Reserved3 = 0x11,

  // Touch packet (0x12..0x17)
  PacketByte0 = 0x12,
  PacketByte1 = 0x13,
  PacketByte2 = 0x14,
  PacketByte3 = 0x15,
  PacketByte4 = 0x16,
  PacketByte5 = 0x17,

  // GPIO (0x18..0x1A)
  PortAGpioControl = 0x18,
  PortAGpioData = 0x19,
  PortBGpioControlData = 0x1A,

  // Extended register access (0x1B..0x1E)
  EraValue = 0x1B,
  EraHighByte = 0x1C,
  EraLowByte = 0x1D,
  EraControl = 0x1E,

  HcoId = 0x1F,
}

impl Reg {
  #[inline]
  pub const fn addr(self) -> u8 {
    self as u8
  }

  #[inline]
  pub(crate) const fn read_command(self) -> u8 {
    READ_MASK | self as u8
  }

  #[inline]
  pub(crate) const fn write_command(self) -> u8 {
    WRITE_MASK | self as u8
  }

  /// Registers left between this one and the end of the register file.
  #[inline]
  pub(crate) const fn remaining(self) -> usize {
    REGISTER_COUNT - self as usize
  }
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

// Extended (ERA) addresses
pub(crate) const EXT_AUTO_EDGE_DETECT: u16 = 0x00DA;
pub(crate) const EXT_ADC_CONFIG: u16 = 0x0187;
pub(crate) const EXT_CALIBRATION_MATRIX: u16 = 0x01DF;

pub(crate) const AUTO_EDGE_DETECT_OFF: u8 = 0x81;
pub(crate) const ADC_GAIN_MASK: u8 = 0xC0;

// Packet sizes
pub(crate) const ABSOLUTE_PACKET_LEN: usize = 6;
pub(crate) const RELATIVE_PACKET_LEN: usize = 4;
/// Raw calibration matrix size in bytes.
pub const CALIBRATION_BYTES: usize = 92;
/// Number of 16-bit compensation values in the calibration matrix.
pub const CALIBRATION_VALUES: usize = CALIBRATION_BYTES / 2;

// Timings (µs)
pub(crate) const CLEAR_FLAGS_SETTLE_US: u32 = 50;
pub(crate) const POWER_CYCLE_US: u32 = 500;
pub(crate) const PRESENCE_PROBE_US: u32 = 500;

// Sensor geometry
/// Largest X the ASIC reports: `(8 * 256) - 1`.
pub const X_MAX: u16 = 2047;
/// Largest Y the ASIC reports: `(6 * 256) - 1`.
pub const Y_MAX: u16 = 1535;
/// Smallest X reachable by a finger on a standard sensor.
pub const X_LOWER: u16 = 127;
/// Largest X reachable by a finger on a standard sensor.
pub const X_UPPER: u16 = 1919;
/// Smallest Y reachable by a finger on a standard sensor.
pub const Y_LOWER: u16 = 63;
/// Largest Y reachable by a finger on a standard sensor.
pub const Y_UPPER: u16 = 1471;
/// Divisor reducing coordinates to a hover-threshold zone index.
pub const ZONE_SCALE: u16 = 256;
/// Zone rows (Y).
pub const ZONE_ROWS: usize = ((Y_MAX + 1) / ZONE_SCALE) as usize;
/// Zone columns (X).
pub const ZONE_COLS: usize = ((X_MAX + 1) / ZONE_SCALE) as usize;
