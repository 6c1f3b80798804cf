use crate::models::{MapSettings, TrackLayout};

/// Slot layout for trains parked in the depot during one frame
///
/// The total count is known up front (two-pass assembly), so the group is
/// always centered on the reference station in the same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepotLayout {
    start_x: f64,
    y: f64,
    spacing: f64,
    count: usize,
}

impl DepotLayout {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(center_x: f64, y: f64, spacing: f64, count: usize) -> Self {
        let span = count.saturating_sub(1) as f64 * spacing;
        Self {
            start_x: center_x - span / 2.0,
            y,
            spacing,
            count,
        }
    }

    /// Layout centered under the configured depot station
    #[must_use]
    pub fn for_frame(layout: &TrackLayout, settings: &MapSettings, count: usize) -> Self {
        Self::new(layout.depot_center_x(), settings.depot_y, settings.depot_slot_spacing, count)
    }

    /// Position of slot `k`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slot(&self, k: usize) -> (f64, f64) {
        (self.start_x + k as f64 * self.spacing, self.y)
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Every slot of this frame in order
    pub fn slots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.count).map(|k| self.slot(k))
    }
}
