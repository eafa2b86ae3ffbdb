use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

use crate::defs::SysConfig1;
use crate::reg::{POWER_CYCLE_US, PRESENCE_PROBE_US};
use crate::{Error, Pinnacle, Reg};

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Shut the ASIC down and power it back up, e.g. to recover a wedged sensor.
  pub async fn cycle_power(&mut self) -> Result<(), Error<E, P>> {
    self.write(Reg::SysConfig1, SysConfig1::new().with_shutdown(true)).await?;
    self.delay.delay_us(POWER_CYCLE_US).await;
    self.write(Reg::SysConfig1, SysConfig1::new()).await?;

    #[cfg(feature = "defmt")]
    defmt::info!("{}: power cycled", self.sensor);
    Ok(())
  }

  /// Best-effort presence probe.
  ///
  /// Writes 0 to the Z-idle register and reads it back. A floating bus reads
  /// back non-zero, so `true` is a good sign, but this is not an identification
  /// and `false` only means "not confirmed". The Z-idle count is left at 0;
  /// call [`Pinnacle::set_z_idle_count`] afterwards to restore it.
  pub async fn sensor_present(&mut self) -> Result<bool, Error<E, P>> {
    self.set_z_idle_count(0).await?;
    self.delay.delay_us(PRESENCE_PROBE_US).await;
    Ok(self.read_register(Reg::ZIdle).await? == 0x00)
  }

  /// Number of empty packets sent after lift-off.
  pub async fn set_z_idle_count(&mut self, count: u8) -> Result<(), Error<E, P>> {
    self.write_register(Reg::ZIdle, count).await
  }
}

#[cfg(test)]
mod tests {
  use embassy_futures::block_on;

  use crate::fake::device;

  #[test]
  fn cycle_power_shuts_down_then_wakes() {
    let mut dev = device();
    block_on(dev.cycle_power()).unwrap();

    assert_eq!(dev.spi.writes_to(0x03), vec![0x02, 0x00]);
    assert_eq!(dev.delay.elapsed_us(), 500);
  }

  #[test]
  fn present_sensor_reads_back_zero() {
    let mut dev = device();
    dev.spi.regs[0x0A] = 5;

    assert!(block_on(dev.sensor_present()).unwrap());
    assert_eq!(dev.spi.regs[0x0A], 0);
    assert_eq!(dev.delay.elapsed_us(), 500);
  }

  #[test]
  fn floating_bus_is_not_confirmed() {
    let mut dev = device();
    dev.spi.absent = true;

    assert!(!block_on(dev.sensor_present()).unwrap());
  }
}
