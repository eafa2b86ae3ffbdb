use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::{Operation, SpiDevice};

use crate::defs::Status1;
use crate::reg::{Reg, CLEAR_FLAGS_SETTLE_US, FILLER};
use crate::{Error, Pinnacle};

impl<SPI, DR, D, E, P> Pinnacle<SPI, DR, D>
where
  SPI: SpiDevice<u8, Error = E>,
  DR: InputPin<Error = P> + Wait,
  D: DelayNs,
{
  /// Read `buf.len()` consecutive registers starting at `reg`.
  ///
  /// One SPI transaction: the read command, two filler bytes while the ASIC
  /// turns the bus around (their responses are meaningless), then one filler
  /// byte per register with the response captured into `buf`.
  ///
  /// Besides transport failures, a read that would run past register 0x1F is
  /// refused with [`Error::BufferOverflow`] before anything is clocked out.
  pub async fn read_registers(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E, P>> {
    if buf.len() > reg.remaining() {
      return Err(Error::BufferOverflow);
    }
    let header = [reg.read_command(), FILLER, FILLER];
    buf.fill(FILLER);
    self
      .spi
      .transaction(&mut [Operation::Write(&header), Operation::TransferInPlace(buf)])
      .await
      .map_err(Error::Spi)
  }

  /// Write a single register. No filler bytes are involved.
  pub async fn write_register(&mut self, reg: Reg, value: u8) -> Result<(), Error<E, P>> {
    let frame = [reg.write_command(), value];
    self.spi.write(&frame).await.map_err(Error::Spi)
  }

  /// Read a single register.
  pub async fn read_register(&mut self, reg: Reg) -> Result<u8, Error<E, P>> {
    let mut b = [0u8; 1];
    self.read_registers(reg, &mut b).await?;
    Ok(b[0])
  }

  // Typed helpers
  pub(crate) async fn read<T: From<u8>>(&mut self, reg: Reg) -> Result<T, Error<E, P>> {
    Ok(T::from(self.read_register(reg).await?))
  }

  pub(crate) async fn read_block<const N: usize, T: From<[u8; N]>>(&mut self, reg: Reg) -> Result<T, Error<E, P>> {
    let mut b = [0u8; N];
    self.read_registers(reg, &mut b).await?;
    Ok(T::from(b))
  }

  pub(crate) async fn write<T: Into<u8>>(&mut self, reg: Reg, v: T) -> Result<(), Error<E, P>> {
    self.write_register(reg, v.into()).await
  }

  /// Clear the SW_CC / SW_DR flags in STATUS_1, which also releases DR.
  pub async fn clear_flags(&mut self) -> Result<(), Error<E, P>> {
    self.write(Reg::Status1, Status1::new()).await?;
    self.delay.delay_us(CLEAR_FLAGS_SETTLE_US).await;
    Ok(())
  }
}
