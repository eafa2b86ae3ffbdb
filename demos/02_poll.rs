//! Event loop example: absolute tracking with hover filtering, then relative mode.
#![allow(unused)]
use embedded_hal::digital::InputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait, spi::SpiDevice};
use pinnacle::{Config, DataMode, Overlay, Pinnacle, Sample, SensorId};

#[allow(dead_code)]
async fn main_async<SPI, DR, D, E, P>(spi: SPI, dr: DR, delay: D) -> Result<(), pinnacle::Error<E, P>>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  let mut pad = Pinnacle::new(spi, dr, delay, SensorId(1), Config::default());
  let mut touch = pad.initialize().await?;
  pad.set_overlay(&mut touch, Overlay::Curved).await?;
  pad.enable_feed(true).await?;

  for _ in 0..1_000 {
    match pad.next_sample(&mut touch).await? {
      Sample::Absolute(abs) if abs.is_idle() => {
        // finger lifted
      }
      Sample::Absolute(abs) if abs.hovering => {
        // ignore, finger is above the overlay
      }
      Sample::Absolute(abs) => {
        let _ = (abs.x, abs.y, abs.z, abs.buttons);
        // handle touch
      }
      Sample::Relative(_) => unreachable!(),
    }
  }

  // Switch to mouse-style reports with the scroll wheel.
  pad.set_mode(&mut touch, DataMode::Relative).await?;
  pad.enable_scroll().await?;
  pad.enable_feed(true).await?;

  loop {
    if let Sample::Relative(rel) = pad.next_sample(&mut touch).await? {
      let _ = (rel.x_delta, rel.y_delta, rel.wheel, rel.buttons);
    }
  }
}

fn main() {}
