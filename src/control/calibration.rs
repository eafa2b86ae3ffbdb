use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

use crate::defs::CalConfig1;
use crate::reg::{CALIBRATION_BYTES, CALIBRATION_VALUES, EXT_CALIBRATION_MATRIX};
use crate::{Error, Pinnacle, Reg};

/// Per-electrode compensation values captured by the last calibration.
pub type CalibrationMatrix = [i16; CALIBRATION_VALUES];

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Run a calibration now and wait for the ASIC to finish it.
  ///
  /// Keep fingers off the sensor. The feed is left disabled.
  pub async fn force_calibration(&mut self) -> Result<(), Error<E, P>> {
    let limit = self.config.poll_attempts(self.config.calibration_timeout_us);
    let mut polls = 0;

    self.enable_feed(false).await?;
    self.modify_cal_config1(|cfg| cfg.set_calibrate(true)).await?;

    while !self.poll_busy(Reg::CalConfig1, CalConfig1::new().with_calibrate(true).into(), &mut polls, limit).await? {}
    self.clear_flags().await?;

    #[cfg(feature = "defmt")]
    defmt::debug!("{}: calibration done after {} polls", self.sensor, polls);
    Ok(())
  }

  pub async fn read_calibration_matrix(&mut self) -> Result<CalibrationMatrix, Error<E, P>> {
    let mut raw = [0u8; CALIBRATION_BYTES];
    self.era_read(EXT_CALIBRATION_MATRIX, &mut raw).await?;

    let mut matrix = [0i16; CALIBRATION_VALUES];
    merge_be_pairs(&raw, &mut matrix);
    Ok(matrix)
  }

  async fn modify_cal_config1<F: FnOnce(&mut CalConfig1)>(&mut self, f: F) -> Result<(), Error<E, P>> {
    let mut cfg: CalConfig1 = self.read(Reg::CalConfig1).await?;
    f(&mut cfg);
    self.write(Reg::CalConfig1, cfg).await
  }
}

/// Pair bytes up as big-endian 16-bit words. Stops at the shorter side.
pub(crate) fn merge_be_pairs(raw: &[u8], out: &mut [i16]) {
  for (word, pair) in out.iter_mut().zip(raw.chunks_exact(2)) {
    *word = i16::from_be_bytes([pair[0], pair[1]]);
  }
}
