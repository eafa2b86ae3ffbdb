//! Bit layouts of the RAP registers the driver manipulates.
#![allow(dead_code)]

use bitfield_struct::bitfield;

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct Status1 {
  #[bits(2)]
  __: u8,
  /// Software data ready.
  pub(crate) sw_dr: bool,
  /// Software command complete.
  pub(crate) sw_cc: bool,
  #[bits(4)]
  ___: u8,
}

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct SysConfig1 {
  pub(crate) reset: bool,
  pub(crate) shutdown: bool,
  pub(crate) low_power: bool,
  #[bits(5)]
  __: u8,
}

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct FeedConfig1 {
  pub(crate) feed_enable: bool,
  /// Set for absolute packets, clear for relative.
  pub(crate) absolute: bool,
  pub(crate) filter_disable: bool,
  pub(crate) x_disable: bool,
  pub(crate) y_disable: bool,
  __: bool,
  pub(crate) x_inverted: bool,
  pub(crate) y_inverted: bool,
}

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct FeedConfig2 {
  pub(crate) intellimouse: bool,
  pub(crate) all_taps_disable: bool,
  pub(crate) secondary_tap_disable: bool,
  pub(crate) scroll_disable: bool,
  pub(crate) glide_extend_disable: bool,
  #[bits(2)]
  __: u8,
  pub(crate) swap_xy: bool,
}

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct CalConfig1 {
  /// Self-clearing once the calibration finished.
  pub(crate) calibrate: bool,
  pub(crate) background_comp: bool,
  pub(crate) nerd_comp: bool,
  pub(crate) track_error_comp: bool,
  pub(crate) tap_comp: bool,
  #[bits(3)]
  __: u8,
}

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct EraControl {
  pub(crate) read: bool,
  pub(crate) write: bool,
  pub(crate) auto_increment: bool,
  #[bits(5)]
  __: u8,
}
