use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

use crate::defs::{FeedConfig1, FeedConfig2};
use crate::reg::{ADC_GAIN_MASK, AUTO_EDGE_DETECT_OFF, EXT_ADC_CONFIG, EXT_AUTO_EDGE_DETECT};
use crate::{DataMode, Error, Overlay, Pinnacle, Reg, TouchData};

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Start or stop the stream of touch packets.
  pub async fn enable_feed(&mut self, enable: bool) -> Result<(), Error<E, P>> {
    self.modify_feed_config1(|cfg| cfg.set_feed_enable(enable)).await
  }

  /// Switch between absolute and relative packets.
  ///
  /// Leaving absolute mode reverts a curved overlay to flat first, which goes
  /// through ERA and therefore leaves the feed disabled.
  pub async fn set_mode(&mut self, touch: &mut TouchData, mode: DataMode) -> Result<(), Error<E, P>> {
    match mode {
      DataMode::Absolute => self.modify_feed_config1(|cfg| cfg.set_absolute(true)).await?,
      DataMode::Relative => {
        if touch.overlay == Overlay::Curved {
          self.set_overlay(touch, Overlay::Flat).await?;
        }
        self.modify_feed_config1(|cfg| cfg.set_absolute(false)).await?;
      }
    }
    touch.mode = mode;
    Ok(())
  }

  /// Select the overlay and the matching ADC attenuation.
  ///
  /// A curved overlay lowers the attenuation so fingers on the thinner
  /// perimeter still register, and turns on hover suppression in
  /// [`Pinnacle::decode`]. It is refused with
  /// [`Error::CurvedRequiresAbsolute`] outside absolute mode, leaving the
  /// device and `touch` untouched. Going back to flat always succeeds.
  pub async fn set_overlay(&mut self, touch: &mut TouchData, overlay: Overlay) -> Result<(), Error<E, P>> {
    let attenuation = match overlay {
      Overlay::Curved if touch.mode != DataMode::Absolute => {
        #[cfg(feature = "defmt")]
        defmt::warn!("{}: curved overlay refused in {} mode", self.sensor, touch.mode);
        return Err(Error::CurvedRequiresAbsolute);
      }
      Overlay::Curved => AdcAttenuation::X2,
      Overlay::Flat => AdcAttenuation::X4,
    };

    self.set_adc_attenuation(attenuation).await?;
    touch.overlay = overlay;
    Ok(())
  }

  /// Update the ADC attenuation, keeping the other bits of the ADC config.
  ///
  /// Returns the value read back from the device after the write.
  pub async fn set_adc_attenuation(&mut self, attenuation: AdcAttenuation) -> Result<u8, Error<E, P>> {
    let current = self.era_read_byte(EXT_ADC_CONFIG).await?;
    let updated = (current & !ADC_GAIN_MASK) | u8::from(attenuation);
    self.era_write(EXT_ADC_CONFIG, updated).await?;
    self.era_read_byte(EXT_ADC_CONFIG).await
  }

  pub async fn adc_attenuation(&mut self) -> Result<AdcAttenuation, Error<E, P>> {
    Ok(AdcAttenuation::from(self.era_read_byte(EXT_ADC_CONFIG).await?))
  }

  /// Enable the two-finger vertical scroll gesture (relative mode only).
  pub async fn enable_scroll(&mut self) -> Result<(), Error<E, P>> {
    self
      .modify_feed_config2(|cfg| {
        cfg.set_scroll_disable(false);
        cfg.set_intellimouse(true);
      })
      .await
  }

  /// Stop the ASIC from switching SPI clock phase on its own.
  ///
  /// The auto-detection can trigger falsely on ringing or glitchy SPI lines;
  /// call this right after the bus is set up.
  pub async fn disable_auto_edge_detect(&mut self) -> Result<(), Error<E, P>> {
    self.era_write(EXT_AUTO_EDGE_DETECT, AUTO_EDGE_DETECT_OFF).await
  }

  async fn modify_feed_config1<F: FnOnce(&mut FeedConfig1)>(&mut self, f: F) -> Result<(), Error<E, P>> {
    let mut cfg: FeedConfig1 = self.read(Reg::FeedConfig1).await?;
    f(&mut cfg);
    self.write(Reg::FeedConfig1, cfg).await
  }

  async fn modify_feed_config2<F: FnOnce(&mut FeedConfig2)>(&mut self, f: F) -> Result<(), Error<E, P>> {
    let mut cfg: FeedConfig2 = self.read(Reg::FeedConfig2).await?;
    f(&mut cfg);
    self.write(Reg::FeedConfig2, cfg).await
  }
}

/// ADC attenuation, held in the top two bits of the ADC config.
///
/// `X1` is the most sensitive, `X4` the least and the power-on default,
/// suited to thin flat overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcAttenuation {
  X1 = 0x00,
  X2 = 0x40,
  X3 = 0x80,
  X4 = 0xC0,
}

impl From<AdcAttenuation> for u8 {
  fn from(v: AdcAttenuation) -> Self {
    v as u8
  }
}

impl From<u8> for AdcAttenuation {
  fn from(bits: u8) -> Self {
    match bits & ADC_GAIN_MASK {
      0x00 => Self::X1,
      0x40 => Self::X2,
      0x80 => Self::X3,
      _ => Self::X4,
    }
  }
}

#[cfg(test)]
mod tests {
  use embassy_futures::block_on;

  use super::*;
  use crate::fake::device;

  #[test]
  fn feed_toggles_only_its_bit() {
    let mut dev = device();
    dev.spi.regs[0x04] = 0xC2;

    block_on(dev.enable_feed(true)).unwrap();
    assert_eq!(dev.spi.regs[0x04], 0xC3);

    block_on(dev.enable_feed(false)).unwrap();
    assert_eq!(dev.spi.regs[0x04], 0xC2);
  }

  #[test]
  fn relative_mode_clears_data_mode_bit() {
    let mut dev = device();
    let mut touch = TouchData::new();
    dev.spi.regs[0x04] = 0x03;

    block_on(dev.set_mode(&mut touch, DataMode::Relative)).unwrap();

    assert_eq!(dev.spi.regs[0x04], 0x01);
    assert_eq!(touch.mode(), DataMode::Relative);
    // Flat overlay: no ERA traffic.
    assert!(dev.spi.writes_to(0x1E).is_empty());
  }

  #[test]
  fn relative_mode_reverts_curved_overlay() {
    let mut dev = device();
    let mut touch = TouchData::new();
    dev.spi.regs[0x04] = 0x03;
    dev.spi.ext[0x0187] = 0x15;

    block_on(dev.set_overlay(&mut touch, Overlay::Curved)).unwrap();
    assert_eq!(dev.spi.ext[0x0187], 0x55);

    block_on(dev.set_mode(&mut touch, DataMode::Relative)).unwrap();

    assert_eq!(touch.overlay(), Overlay::Flat);
    assert_eq!(touch.mode(), DataMode::Relative);
    assert_eq!(dev.spi.ext[0x0187], 0xD5);
    // Data mode bit cleared, feed left off by the ERA access.
    assert_eq!(dev.spi.regs[0x04], 0x00);
  }

  #[test]
  fn curved_overlay_refused_in_relative_mode() {
    let mut dev = device();
    let mut touch = TouchData::new();
    block_on(dev.set_mode(&mut touch, DataMode::Relative)).unwrap();
    let frames_before = dev.spi.frames.len();

    let res = block_on(dev.set_overlay(&mut touch, Overlay::Curved));

    assert_eq!(res, Err(Error::CurvedRequiresAbsolute));
    assert_eq!(touch.overlay(), Overlay::Flat);
    assert_eq!(dev.spi.frames.len(), frames_before);
  }

  #[test]
  fn flat_overlay_always_allowed() {
    let mut dev = device();
    let mut touch = TouchData::new();
    block_on(dev.set_mode(&mut touch, DataMode::Relative)).unwrap();

    block_on(dev.set_overlay(&mut touch, Overlay::Flat)).unwrap();

    assert_eq!(touch.overlay(), Overlay::Flat);
    assert_eq!(AdcAttenuation::from(dev.spi.ext[0x0187]), AdcAttenuation::X4);
  }

  #[test]
  fn adc_attenuation_keeps_low_bits_and_reads_back() {
    let mut dev = device();
    dev.spi.ext[0x0187] = 0xFF;

    let readback = block_on(dev.set_adc_attenuation(AdcAttenuation::X3)).unwrap();

    assert_eq!(readback, 0xBF);
    assert_eq!(dev.spi.ext[0x0187], 0xBF);
    assert_eq!(block_on(dev.adc_attenuation()).unwrap(), AdcAttenuation::X3);
  }

  #[test]
  fn scroll_enables_intellimouse_and_clears_disable() {
    let mut dev = device();
    dev.spi.regs[0x05] = 0x1E;

    block_on(dev.enable_scroll()).unwrap();

    assert_eq!(dev.spi.regs[0x05], 0x17);
  }

  #[test]
  fn auto_edge_detect_goes_through_era() {
    let mut dev = device();
    block_on(dev.disable_auto_edge_detect()).unwrap();
    assert_eq!(dev.spi.ext[0x00DA], 0x81);
  }
}
