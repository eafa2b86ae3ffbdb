use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

use crate::{DataMode, Error, Pinnacle, Reg, TouchData};

mod calibration;
mod feed_config;
mod system_control;

pub use calibration::*;
pub use feed_config::*;

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Bring the sensor into its baseline streaming state.
  ///
  /// Clears pending status flags, programs the Z-idle count from [`crate::Config`],
  /// enables the feed and selects absolute mode. Returns the [`TouchData`] to
  /// hand to every later decode for this sensor.
  pub async fn initialize(&mut self) -> Result<TouchData, Error<E, P>> {
    self.clear_flags().await?;
    self.set_z_idle_count(self.config.z_idle_count).await?;
    self.enable_feed(true).await?;

    let mut touch = TouchData::new();
    self.set_mode(&mut touch, DataMode::Absolute).await?;

    #[cfg(feature = "defmt")]
    defmt::info!("{}: initialized, absolute feed enabled", self.sensor);
    Ok(touch)
  }

  /// Fetch the firmware identifier and revision.
  pub async fn firmware(&mut self) -> Result<Firmware, Error<E, P>> {
    self.read_block::<2, _>(Reg::FirmwareId).await
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Firmware {
  pub id: u8,
  pub version: u8,
}

impl From<[u8; 2]> for Firmware {
  fn from(b: [u8; 2]) -> Self {
    Self { id: b[0], version: b[1] }
  }
}
