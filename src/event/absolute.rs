use crate::HoverThresholds;

/// One absolute-mode report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsoluteData {
  /// Button mask (5 bits).
  pub buttons: u8,
  /// 0..=2047 on a standard sensor.
  pub x: u16,
  /// 0..=1535 on a standard sensor.
  pub y: u16,
  /// Signal strength (6 bits). Drops towards 0 as the finger moves away.
  pub z: u8,
  /// Only evaluated while a curved overlay is selected.
  pub hovering: bool,
}

impl AbsoluteData {
  pub const fn new(buttons: u8, x: u16, y: u16, z: u8) -> Self {
    Self { buttons, x, y, z, hovering: false }
  }

  /// Whether this is one of the all-zero packets sent after lift-off.
  pub const fn is_idle(&self) -> bool {
    self.x == 0 && self.y == 0 && self.z == 0
  }

  /// Flag the report as hovering when its Z does not clear the zone threshold.
  pub fn apply_hover_thresholds(&mut self, thresholds: &HoverThresholds) {
    self.hovering = thresholds.is_hovering(self.x, self.y, self.z);
  }
}

impl From<[u8; 6]> for AbsoluteData {
  fn from(p: [u8; 6]) -> Self {
    let x = u16::from(p[2]) | (u16::from(p[4] & 0x0F) << 8);
    let y = u16::from(p[3]) | (u16::from(p[4] & 0xF0) << 4);
    Self::new(p[0] & 0x1F, x, y, p[5] & 0x3F)
  }
}
