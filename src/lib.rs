#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async, `no_std` driver for the Cirque Pinnacle capacitive touch ASIC.
//!
//! The Pinnacle speaks a small byte-oriented Register Access Protocol (RAP)
//! over SPI, with a secondary Extended Register Access (ERA) handshake for the
//! 16-bit addressed tuning space. This crate exposes a strongly typed API on
//! top of both, with helpers for:
//!
//! - Bringing a sensor into absolute or relative streaming mode
//! - Decoding absolute (x, y, z, buttons) and relative (Δx, Δy, Δwheel) packets
//! - Curved-overlay support with per-zone hover suppression
//! - ADC attenuation, forced calibration and compensation-matrix readout
//! - Using `embedded-hal` / `embedded-hal-async` 1.0 traits so the driver works
//!   across MCU families
//!
//! Every busy-flag poll on the device is bounded by [`Config`]; a sensor that
//! stops answering surfaces as [`Error::Unresponsive`] instead of hanging.
//!
//! ```no_run
//! use embedded_hal::digital::InputPin;
//! use embedded_hal_async::{delay::DelayNs, digital::Wait, spi::SpiDevice};
//! use pinnacle::{Config, Pinnacle, Sample, SensorId};
//!
//! async fn example<SPI, DR, D>(spi: SPI, dr: DR, delay: D) -> Result<(), pinnacle::Error<SPI::Error, DR::Error>>
//! where
//!   SPI: SpiDevice,
//!   DR: InputPin + Wait,
//!   D: DelayNs,
//! {
//!   let mut pad = Pinnacle::new(spi, dr, delay, SensorId(0), Config::default());
//!   let mut touch = pad.initialize().await?;
//!
//!   loop {
//!     if let Sample::Absolute(abs) = pad.next_sample(&mut touch).await? {
//!       let _ = (abs.x, abs.y, abs.z);
//!     }
//!   }
//! }
//! ```
mod config;
mod control;
mod defs;
mod era;
mod event;
mod reg;
mod rw;

#[cfg(test)]
mod fake;

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

pub use config::*;
pub use control::*;
pub use event::*;
pub use reg::{
  Reg, CALIBRATION_BYTES, CALIBRATION_VALUES, MAX_SPI_FREQUENCY_HZ, REGISTER_COUNT, SPI_MODE, X_LOWER, X_MAX,
  X_UPPER, Y_LOWER, Y_MAX, Y_UPPER, ZONE_COLS, ZONE_ROWS, ZONE_SCALE,
};

/// Errors that can occur while interacting with the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E, P> {
  /// SPI transaction failed with the underlying driver error.
  Spi(E),
  /// Reading or waiting on the data-ready pin failed.
  DataReady(P),
  /// A busy flag in the given register never cleared within the configured budget.
  Unresponsive(Reg),
  /// A curved overlay can only be selected while the sensor reports absolute data.
  CurvedRequiresAbsolute,
  /// A read would run past the end of the RAP register file.
  BufferOverflow,
}

impl<E: core::fmt::Debug, P: core::fmt::Debug> core::fmt::Display for Error<E, P> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Error::Spi(e) => write!(f, "SPI error: {:?}", e),
      Error::DataReady(e) => write!(f, "data-ready pin error: {:?}", e),
      Error::Unresponsive(reg) => write!(f, "sensor unresponsive, {:?} stayed busy", reg),
      Error::CurvedRequiresAbsolute => write!(f, "curved overlay requires absolute mode"),
      Error::BufferOverflow => write!(f, "read runs past the register file"),
    }
  }
}

/// Identifies which physical sensor a driver instance talks to.
///
/// Purely informational: it tags log output and lets a host juggling several
/// pads tell them apart. Each sensor still needs its own [`Pinnacle`] with its
/// own chip-select carrying `SpiDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorId(pub u8);

/// Driver for a single Pinnacle sensor.
///
/// The driver owns the SPI device (and with it the sensor's chip select), the
/// data-ready pin and a delay provider. Mode and overlay state are not kept
/// here but in the caller's [`TouchData`], which is handed to every operation
/// that depends on it.
pub struct Pinnacle<SPI, DR, D> {
  spi: SPI,
  dr: DR,
  delay: D,
  sensor: SensorId,
  config: Config,
}

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Create a new driver instance with the provided peripherals.
  ///
  /// Nothing is sent to the sensor until [`Pinnacle::initialize`] is called.
  pub fn new(spi: SPI, dr: DR, delay: D, sensor: SensorId, config: Config) -> Self {
    Self { spi, dr, delay, sensor, config }
  }

  /// The identifier this instance was created with.
  pub fn sensor(&self) -> SensorId {
    self.sensor
  }

  /// Tuning this instance runs with.
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Give the peripherals back.
  pub fn release(self) -> (SPI, DR, D) {
    (self.spi, self.dr, self.delay)
  }
}
