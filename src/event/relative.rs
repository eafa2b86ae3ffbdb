/// One relative-mode report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelativeData {
  /// Button mask (3 bits).
  pub buttons: u8,
  pub x_delta: i8,
  pub y_delta: i8,
  pub wheel: i8,
}

impl RelativeData {
  pub const fn new(buttons: u8, x_delta: i8, y_delta: i8, wheel: i8) -> Self {
    Self { buttons, x_delta, y_delta, wheel }
  }
}

impl From<[u8; 4]> for RelativeData {
  fn from(p: [u8; 4]) -> Self {
    Self::new(p[0] & 0x07, p[1] as i8, p[2] as i8, p[3] as i8)
  }
}
