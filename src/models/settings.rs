use serde::{Deserialize, Serialize};
use crate::time::parse_clock;

/// Geometry and timing knobs for the train map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Centerline between the two parallel tracks
    #[serde(default = "default_track_y")]
    pub track_y: f64,
    /// Distance between the northbound and southbound tracks
    #[serde(default = "default_track_gap")]
    pub track_gap: f64,
    /// How far past a terminus the turnaround loop is drawn
    #[serde(default = "default_loop_offset")]
    pub loop_offset: f64,
    #[serde(default = "default_depot_y")]
    pub depot_y: f64,
    #[serde(default = "default_depot_slot_spacing")]
    pub depot_slot_spacing: f64,
    /// Station the depot strip is centered under
    #[serde(default = "default_depot_station_id")]
    pub depot_station_id: u32,
    /// How long a train whose schedule ends on a turnaround stays on the loop
    #[serde(default = "default_turnaround_hold_secs")]
    pub turnaround_hold_secs: i64,
    /// Wall-clock interval between map refreshes
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub service_period: ServicePeriod,
}

fn default_track_y() -> f64 {
    120.0
}

fn default_track_gap() -> f64 {
    16.0
}

fn default_loop_offset() -> f64 {
    24.0
}

fn default_depot_y() -> f64 {
    200.0
}

fn default_depot_slot_spacing() -> f64 {
    18.0
}

fn default_depot_station_id() -> u32 {
    1
}

fn default_turnaround_hold_secs() -> i64 {
    120
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            track_y: default_track_y(),
            track_gap: default_track_gap(),
            loop_offset: default_loop_offset(),
            depot_y: default_depot_y(),
            depot_slot_spacing: default_depot_slot_spacing(),
            depot_station_id: default_depot_station_id(),
            turnaround_hold_secs: default_turnaround_hold_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            service_period: ServicePeriod::default(),
        }
    }
}

impl MapSettings {
    /// Load settings from JSON, filling missing fields with defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse map settings: {e}"))
    }
}

/// Inclusive slice of the service day shown by the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: i64,
    pub end: i64,
}

impl ViewWindow {
    /// Build a window, swapping the bounds if they are reversed
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    #[must_use]
    pub fn clamp(self, t: i64) -> i64 {
        t.clamp(self.start, self.end)
    }

    #[must_use]
    pub const fn duration(self) -> i64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ServicePeriod {
    AmPeak,
    PmPeak,
    #[default]
    FullDay,
}

impl ServicePeriod {
    pub const ALL: [Self; 3] = [Self::AmPeak, Self::PmPeak, Self::FullDay];

    #[must_use]
    pub fn window(self) -> ViewWindow {
        let (start, end) = match self {
            Self::AmPeak => ("06:00:00", "09:00:00"),
            Self::PmPeak => ("16:00:00", "20:00:00"),
            Self::FullDay => ("05:00:00", "23:00:00"),
        };
        ViewWindow::new(parse_clock(start), parse_clock(end))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AmPeak => "AM Peak",
            Self::PmPeak => "PM Peak",
            Self::FullDay => "Full Day",
        }
    }
}
