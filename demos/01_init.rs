//! Bring-up example: probe, tune for a curved overlay, calibrate.
#![allow(unused)]
use embedded_hal::digital::InputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait, spi::SpiDevice};
use pinnacle::{AdcAttenuation, Config, Overlay, Pinnacle, SensorId};

#[allow(dead_code)]
async fn main_async<SPI, DR, D, E, P>(spi: SPI, dr: DR, delay: D) -> Result<(), pinnacle::Error<E, P>>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  // Bus must run in SPI mode 1 at no more than 13 MHz.
  let _ = (pinnacle::SPI_MODE, pinnacle::MAX_SPI_FREQUENCY_HZ);

  let config = Config::default().with_z_idle_count(3);
  let mut pad = Pinnacle::new(spi, dr, delay, SensorId(0), config);

  pad.disable_auto_edge_detect().await?;
  if !pad.sensor_present().await? {
    // nothing answered on this chip select
    return Ok(());
  }

  let fw = pad.firmware().await?;
  let _ = (fw.id, fw.version);

  let mut touch = pad.initialize().await?;
  pad.set_overlay(&mut touch, Overlay::Curved).await?;
  debug_assert_eq!(pad.adc_attenuation().await?, AdcAttenuation::X2);

  pad.force_calibration().await?;
  let matrix = pad.read_calibration_matrix().await?;
  let _ = matrix;

  // ERA access and calibration leave the feed off.
  pad.enable_feed(true).await?;
  Ok(())
}

fn main() {}
