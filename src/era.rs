use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiDevice;

use crate::defs::EraControl;
use crate::{Error, Pinnacle, Reg};

/// Progress of an extended-register read. One pass per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ReadStep {
  Idle,
  AddressSet,
  ReadRequested,
  Polling,
  ValueReady,
}

/// Progress of an extended-register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum WriteStep {
  Idle,
  ValueSet,
  AddressSet,
  WriteRequested,
  Polling,
}

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Read `buf.len()` consecutive extended registers starting at `address`.
  ///
  /// The feed is disabled first, since ERA access is undefined while the ASIC
  /// streams, and it is left disabled afterwards.
  pub async fn era_read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Error<E, P>> {
    let limit = self.config.poll_attempts(self.config.era_timeout_us);
    let mut state = ReadStep::Idle;
    let mut next = 0;
    let mut polls = 0;

    // Auto-increment moves the address along, so it is only sent once.
    self.enable_feed(false).await?;
    self.set_era_address(address).await?;

    loop {
      state = match state {
        ReadStep::Idle if next == buf.len() => break,
        ReadStep::Idle => ReadStep::AddressSet,
        ReadStep::AddressSet => {
          let cmd = EraControl::new().with_read(true).with_auto_increment(true);
          self.write(Reg::EraControl, cmd).await?;
          ReadStep::ReadRequested
        }
        ReadStep::ReadRequested => {
          polls = 0;
          ReadStep::Polling
        }
        ReadStep::Polling => {
          if self.poll_busy(Reg::EraControl, 0xFF, &mut polls, limit).await? {
            ReadStep::ValueReady
          } else {
            ReadStep::Polling
          }
        }
        ReadStep::ValueReady => {
          buf[next] = self.read_register(Reg::EraValue).await?;
          self.clear_flags().await?;
          next += 1;
          ReadStep::Idle
        }
      };
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("{}: ERA read {} bytes at {=u16:#x}", self.sensor, buf.len(), address);
    Ok(())
  }

  /// Read a single extended register. Leaves the feed disabled.
  pub async fn era_read_byte(&mut self, address: u16) -> Result<u8, Error<E, P>> {
    let mut b = [0u8; 1];
    self.era_read(address, &mut b).await?;
    Ok(b[0])
  }

  /// Write one extended register. Leaves the feed disabled.
  pub async fn era_write(&mut self, address: u16, value: u8) -> Result<(), Error<E, P>> {
    let limit = self.config.poll_attempts(self.config.era_timeout_us);
    let mut state = WriteStep::Idle;
    let mut polls = 0;

    loop {
      state = match state {
        WriteStep::Idle => {
          self.enable_feed(false).await?;
          self.write_register(Reg::EraValue, value).await?;
          WriteStep::ValueSet
        }
        WriteStep::ValueSet => {
          self.set_era_address(address).await?;
          WriteStep::AddressSet
        }
        WriteStep::AddressSet => {
          self.write(Reg::EraControl, EraControl::new().with_write(true)).await?;
          WriteStep::WriteRequested
        }
        WriteStep::WriteRequested => {
          polls = 0;
          WriteStep::Polling
        }
        WriteStep::Polling => {
          if self.poll_busy(Reg::EraControl, 0xFF, &mut polls, limit).await? {
            self.clear_flags().await?;
            break;
          }
          WriteStep::Polling
        }
      };
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("{}: ERA wrote {=u8:#x} at {=u16:#x}", self.sensor, value, address);
    Ok(())
  }

  async fn set_era_address(&mut self, address: u16) -> Result<(), Error<E, P>> {
    let [hi, lo] = address.to_be_bytes();
    self.write_register(Reg::EraHighByte, hi).await?;
    self.write_register(Reg::EraLowByte, lo).await
  }

  /// Poll `reg` once. Resolves to `true` once every bit in `mask` reads clear,
  /// otherwise sleeps one poll interval. Fails after `limit` busy reads.
  pub(crate) async fn poll_busy(&mut self, reg: Reg, mask: u8, polls: &mut u32, limit: u32) -> Result<bool, Error<E, P>> {
    if self.read_register(reg).await? & mask == 0 {
      return Ok(true);
    }

    *polls += 1;
    if *polls >= limit {
      #[cfg(feature = "defmt")]
      defmt::warn!("{}: {} still busy after {} polls", self.sensor, reg, *polls);
      return Err(Error::Unresponsive(reg));
    }

    self.delay.delay_us(self.config.poll_interval_us).await;
    Ok(false)
  }
}
