use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

use crate::reg::{ABSOLUTE_PACKET_LEN, RELATIVE_PACKET_LEN};
use crate::{Error, Pinnacle, Reg};

mod absolute;
mod hover;
mod relative;

pub use absolute::*;
pub use hover::*;
pub use relative::*;

/// Packet format the sensor streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataMode {
  /// Deltas and wheel, like a PS/2 mouse.
  Relative,
  /// Position, strength and buttons.
  #[default]
  Absolute,
}

/// Physical covering over the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Overlay {
  #[default]
  Flat,
  /// Needs [`DataMode::Absolute`] so hovering fingers can be filtered out.
  Curved,
}

/// The reading that is valid for the current [`DataMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sample {
  Absolute(AbsoluteData),
  Relative(RelativeData),
}

/// Per-sensor touch state, updated in place by [`Pinnacle::decode`].
///
/// Holds the last reading of each kind. Only the one matching [`TouchData::mode`]
/// is current; the other keeps stale data from before the last mode switch.
/// Mode and overlay only change through [`Pinnacle::set_mode`] and
/// [`Pinnacle::set_overlay`] so they always agree with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchData {
  pub absolute: AbsoluteData,
  pub relative: RelativeData,
  pub(crate) mode: DataMode,
  pub(crate) overlay: Overlay,
}

impl TouchData {
  pub const fn new() -> Self {
    Self {
      absolute: AbsoluteData::new(0, 0, 0, 0),
      relative: RelativeData::new(0, 0, 0, 0),
      mode: DataMode::Absolute,
      overlay: Overlay::Flat,
    }
  }

  pub const fn mode(&self) -> DataMode {
    self.mode
  }

  pub const fn overlay(&self) -> Overlay {
    self.overlay
  }

  /// The current reading.
  pub const fn sample(&self) -> Sample {
    match self.mode {
      DataMode::Absolute => Sample::Absolute(self.absolute),
      DataMode::Relative => Sample::Relative(self.relative),
    }
  }
}

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Whether the sensor is asserting data-ready. No bus traffic.
  pub fn is_data_ready(&mut self) -> Result<bool, Error<E, P>> {
    self.dr.is_high().map_err(Error::DataReady)
  }

  /// Wait for the sensor to assert data-ready.
  pub async fn wait_for_data_ready(&mut self) -> Result<(), Error<E, P>> {
    self.dr.wait_for_high().await.map_err(Error::DataReady)
  }

  /// Await data-ready, then decode the packet into `touch`.
  pub async fn next_sample(&mut self, touch: &mut TouchData) -> Result<Sample, Error<E, P>> {
    self.wait_for_data_ready().await?;
    self.decode(touch).await
  }

  /// Read the pending packet in the format `touch` is in and store it there.
  ///
  /// Call once data-ready is asserted; clearing the status flags afterwards
  /// releases the line for the next packet.
  pub async fn decode(&mut self, touch: &mut TouchData) -> Result<Sample, Error<E, P>> {
    match touch.mode {
      DataMode::Absolute => {
        let mut abs: AbsoluteData = self.read_block::<ABSOLUTE_PACKET_LEN, _>(Reg::PacketByte0).await?;
        self.clear_flags().await?;
        if touch.overlay == Overlay::Curved {
          abs.apply_hover_thresholds(&self.config.hover_thresholds);
        }
        touch.absolute = abs;
      }
      DataMode::Relative => {
        touch.relative = self.read_block::<RELATIVE_PACKET_LEN, _>(Reg::PacketByte0).await?;
        self.clear_flags().await?;
      }
    }
    Ok(touch.sample())
  }
}
