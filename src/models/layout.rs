use indexmap::IndexMap;
use super::{Direction, MapSettings};

const STATION_TABLE: &str = include_str!("../../assets/stations.csv");

#[derive(Debug, Clone, PartialEq)]
pub struct StationGeometry {
    pub name: String,
    pub x: f64,
}

/// Static station and track geometry for one line
///
/// Stations keep the order they appear in the table; that order is the
/// station index reported for docked trains.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    stations: IndexMap<u32, StationGeometry>,
    track_y: f64,
    track_gap: f64,
    loop_offset: f64,
    depot_station_id: u32,
}

impl TrackLayout {
    /// Build a layout from a `id,name,x` CSV table
    ///
    /// Rows with a missing or non-numeric id or x are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid station rows are found
    pub fn from_csv(content: &str, settings: &MapSettings) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut stations = IndexMap::new();
        for record in reader.records() {
            let Ok(row) = record else { continue };

            let Some(id) = row.get(0).and_then(|s| s.parse::<u32>().ok()) else {
                continue;
            };
            let Some(x) = row.get(2).and_then(|s| s.parse::<f64>().ok()) else {
                continue;
            };
            let name = row.get(1).unwrap_or_default().to_string();

            stations.insert(id, StationGeometry { name, x });
        }

        if stations.is_empty() {
            return Err("Failed to load station table: no valid rows".to_string());
        }

        Ok(Self::from_stations(stations, settings))
    }

    /// Layout of the line shipped with the application
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded station table is invalid
    pub fn embedded(settings: &MapSettings) -> Result<Self, String> {
        Self::from_csv(STATION_TABLE, settings)
    }

    #[must_use]
    pub fn from_stations(stations: IndexMap<u32, StationGeometry>, settings: &MapSettings) -> Self {
        Self {
            stations,
            track_y: settings.track_y,
            track_gap: settings.track_gap,
            loop_offset: settings.loop_offset,
            depot_station_id: settings.depot_station_id,
        }
    }

    /// Horizontal coordinate of a station; unknown ids resolve to 0
    #[must_use]
    pub fn station_x(&self, station_id: u32) -> f64 {
        self.stations.get(&station_id).map_or(0.0, |s| s.x)
    }

    #[must_use]
    pub fn station_index(&self, station_id: u32) -> Option<usize> {
        self.stations.get_index_of(&station_id)
    }

    #[must_use]
    pub fn station_name(&self, station_id: u32) -> Option<&str> {
        self.stations.get(&station_id).map(|s| s.name.as_str())
    }

    pub fn stations(&self) -> impl Iterator<Item = (u32, &StationGeometry)> {
        self.stations.iter().map(|(&id, s)| (id, s))
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Vertical coordinate of the track a direction runs on
    #[must_use]
    pub fn track_y(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Northbound => self.track_y - self.track_gap / 2.0,
            Direction::Southbound => self.track_y + self.track_gap / 2.0,
        }
    }

    #[must_use]
    pub const fn centerline_y(&self) -> f64 {
        self.track_y
    }

    /// Point on the turnaround loop just past a terminus
    ///
    /// End stations loop outward from the line; a turnback in the middle of
    /// the line loops ahead of the incoming direction of travel.
    #[must_use]
    pub fn loop_position(&self, station_id: u32, incoming: Direction) -> (f64, f64) {
        let x = self.station_x(station_id);
        let last = self.stations.len().saturating_sub(1);
        let outward = match self.station_index(station_id) {
            Some(0) if last > 0 => -1.0,
            Some(idx) if idx == last && last > 0 => 1.0,
            _ => match incoming {
                Direction::Southbound => 1.0,
                Direction::Northbound => -1.0,
            },
        };
        (x + outward * self.loop_offset, self.track_y)
    }

    /// Reference x the depot strip is centered on
    #[must_use]
    pub fn depot_center_x(&self) -> f64 {
        self.station_x(self.depot_station_id)
    }

    /// Linear interpolation between two stations' x coordinates
    #[must_use]
    pub fn interpolate_x(&self, from_station: u32, to_station: u32, progress: f64) -> f64 {
        let from_x = self.station_x(from_station);
        let to_x = self.station_x(to_station);
        from_x + (to_x - from_x) * progress
    }
}
