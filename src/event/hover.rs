use crate::reg::{ZONE_COLS, ZONE_ROWS, ZONE_SCALE};

/// Per-zone Z thresholds used to flag hovering fingers on a curved overlay.
///
/// A curved overlay is tuned so a finger on the thin perimeter still
/// registers, which makes a finger hovering over the thick center register
/// too. Each entry holds the Z at or below which a touch in that zone is
/// considered hovering. Rows are indexed by `y / 256`, columns by `x / 256`.
///
/// The values need tuning per overlay; the default table is Cirque's
/// reference starting point and is not guaranteed for every build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoverThresholds {
  zones: [[u8; ZONE_COLS]; ZONE_ROWS],
}

impl HoverThresholds {
  pub const DEFAULT: Self = Self::new([
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 3, 5, 5, 3, 2, 0],
    [0, 3, 5, 15, 15, 5, 2, 0],
    [0, 3, 5, 15, 15, 5, 3, 0],
    [0, 2, 3, 5, 5, 3, 2, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
  ]);

  pub const fn new(zones: [[u8; ZONE_COLS]; ZONE_ROWS]) -> Self {
    Self { zones }
  }

  /// Threshold for the zone containing `(x, y)`.
  ///
  /// Coordinates past the reported range land in the outermost zone.
  pub fn threshold(&self, x: u16, y: u16) -> u8 {
    let col = usize::from(x / ZONE_SCALE).min(ZONE_COLS - 1);
    let row = usize::from(y / ZONE_SCALE).min(ZONE_ROWS - 1);
    self.zones[row][col]
  }

  /// A touch hovers unless its Z is strictly above the zone threshold.
  pub fn is_hovering(&self, x: u16, y: u16, z: u8) -> bool {
    z <= self.threshold(x, y)
  }
}

impl Default for HoverThresholds {
  fn default() -> Self {
    Self::DEFAULT
  }
}
