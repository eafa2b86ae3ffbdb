use crate::HoverThresholds;

/// Driver tuning applied for the lifetime of a [`crate::Pinnacle`] instance.
///
/// The defaults reproduce Cirque's reference bring-up. The poll budgets bound
/// every busy-wait on the device: once exhausted the operation fails with
/// [`crate::Error::Unresponsive`].
///
/// # Example
/// ```no_run
/// use pinnacle::{Config, HoverThresholds};
///
/// let config = Config::default()
///   .with_z_idle_count(3)
///   .with_calibration_timeout_us(250_000)
///   .with_hover_thresholds(HoverThresholds::new([[4; 8]; 6]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// Number of all-zero packets sent after lift-off, useful for tap detection.
  pub z_idle_count: u8,
  /// Delay between two polls of a busy flag, in microseconds.
  pub poll_interval_us: u32,
  /// Budget for an ERA read/write handshake to complete, in microseconds.
  pub era_timeout_us: u32,
  /// Budget for a forced calibration to complete, in microseconds.
  pub calibration_timeout_us: u32,
  /// Per-zone Z thresholds applied while a curved overlay is selected.
  pub hover_thresholds: HoverThresholds,
}

impl Config {
  pub const fn new() -> Self {
    Self {
      z_idle_count: 5,
      poll_interval_us: 10,
      era_timeout_us: 10_000,
      calibration_timeout_us: 500_000,
      hover_thresholds: HoverThresholds::DEFAULT,
    }
  }

  pub const fn with_z_idle_count(mut self, count: u8) -> Self {
    self.z_idle_count = count;
    self
  }

  pub const fn with_poll_interval_us(mut self, us: u32) -> Self {
    self.poll_interval_us = us;
    self
  }

  pub const fn with_era_timeout_us(mut self, us: u32) -> Self {
    self.era_timeout_us = us;
    self
  }

  pub const fn with_calibration_timeout_us(mut self, us: u32) -> Self {
    self.calibration_timeout_us = us;
    self
  }

  pub const fn with_hover_thresholds(mut self, thresholds: HoverThresholds) -> Self {
    self.hover_thresholds = thresholds;
    self
  }

  /// Number of polls that fit into `timeout_us`. Always at least one.
  pub(crate) const fn poll_attempts(&self, timeout_us: u32) -> u32 {
    let interval = if self.poll_interval_us == 0 { 1 } else { self.poll_interval_us };
    let attempts = timeout_us / interval;
    if attempts == 0 {
      1
    } else {
      attempts
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}
