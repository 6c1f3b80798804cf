use serde::{Deserialize, Serialize};
use crate::constants::{NORTHBOUND_ROTATION, SOUTHBOUND_ROTATION, WITHDRAWN_SENTINEL};
use crate::time::try_parse_clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Northbound,
    Southbound,
}

impl Direction {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northbound" | "nb" => Some(Self::Northbound),
            "southbound" | "sb" => Some(Self::Southbound),
            _ => None,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Northbound => Self::Southbound,
            Self::Southbound => Self::Northbound,
        }
    }

    /// Visual heading in degrees
    #[must_use]
    pub const fn rotation(self) -> f64 {
        match self {
            Self::Northbound => NORTHBOUND_ROTATION,
            Self::Southbound => SOUTHBOUND_ROTATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrainStatus {
    #[default]
    Active,
    /// Leaves circulation after this event's departure
    Inactive,
}

impl TrainStatus {
    /// Missing or unknown values are treated as active
    #[must_use]
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "inactive" => Self::Inactive,
            _ => Self::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepartureTime {
    At(i64),
    /// Removed from service at this event, never departs
    Withdrawn,
}

impl DepartureTime {
    /// Real departure seconds, `None` for a withdrawal
    #[must_use]
    pub const fn seconds(self) -> Option<i64> {
        match self {
            Self::At(t) => Some(t),
            Self::Withdrawn => None,
        }
    }

    /// Ordering key: withdrawals sort after every real time
    #[must_use]
    pub const fn sort_key(self) -> i64 {
        match self {
            Self::At(t) => t,
            Self::Withdrawn => i64::MAX,
        }
    }
}

/// One train's scheduled visit to one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEvent {
    pub train_id: u32,
    pub station_id: u32,
    pub direction: Direction,
    pub arrival: Option<i64>,
    pub departure: Option<DepartureTime>,
    pub status: TrainStatus,
}

impl TimetableEvent {
    /// Real (non-withdrawn) departure seconds
    #[must_use]
    pub fn departure_seconds(&self) -> Option<i64> {
        self.departure.and_then(DepartureTime::seconds)
    }

    #[must_use]
    pub fn is_withdrawn(&self) -> bool {
        matches!(self.departure, Some(DepartureTime::Withdrawn))
    }

    /// Earliest timestamp carried by this event
    #[must_use]
    pub fn first_timestamp(&self) -> Option<i64> {
        self.arrival.or_else(|| self.departure_seconds())
    }
}

/// Timetable entry exactly as the simulation backend sends it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTimetableEntry {
    #[serde(rename = "Train ID", default, deserialize_with = "deserialize_id")]
    pub train_id: Option<u32>,
    #[serde(rename = "NStation", default, deserialize_with = "deserialize_id")]
    pub station_id: Option<u32>,
    #[serde(rename = "Direction", default)]
    pub direction: Option<String>,
    #[serde(rename = "Arrival Time", default)]
    pub arrival_time: Option<String>,
    #[serde(rename = "Departure Time", default)]
    pub departure_time: Option<String>,
    #[serde(rename = "Train Status", default)]
    pub train_status: Option<String>,
}

impl RawTimetableEntry {
    /// Validate and convert into a `TimetableEvent`
    ///
    /// Returns `None` when the train id, station id or direction is missing,
    /// or when a time is present but unparseable.
    #[must_use]
    pub fn to_event(&self) -> Option<TimetableEvent> {
        let train_id = self.train_id?;
        let station_id = self.station_id?;
        let direction = Direction::parse(self.direction.as_deref()?)?;

        let arrival = match non_empty(self.arrival_time.as_deref()) {
            Some(s) => Some(try_parse_clock(s)?),
            None => None,
        };

        let departure = match non_empty(self.departure_time.as_deref()) {
            Some(s) if s.eq_ignore_ascii_case(WITHDRAWN_SENTINEL) => Some(DepartureTime::Withdrawn),
            Some(s) => Some(DepartureTime::At(try_parse_clock(s)?)),
            None => None,
        };

        Some(TimetableEvent {
            train_id,
            station_id,
            direction,
            arrival,
            departure,
            status: TrainStatus::parse(self.train_status.as_deref()),
        })
    }
}

/// Ids arrive as JSON integers or as integral floats (`1.0`); anything else is `None`
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn id_from_value(value: &serde_json::Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f)).then(|| f as u32)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(train: Option<u32>, arrival: Option<&str>, departure: Option<&str>) -> RawTimetableEntry {
        RawTimetableEntry {
            train_id: train,
            station_id: Some(3),
            direction: Some("northbound".to_string()),
            arrival_time: arrival.map(ToString::to_string),
            departure_time: departure.map(ToString::to_string),
            train_status: None,
        }
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("Northbound"), Some(Direction::Northbound));
        assert_eq!(Direction::parse(" southbound "), Some(Direction::Southbound));
        assert_eq!(Direction::parse("eastbound"), None);
        assert_eq!(Direction::Northbound.opposite(), Direction::Southbound);
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(TrainStatus::parse(None), TrainStatus::Active);
        assert_eq!(TrainStatus::parse(Some("ACTIVE")), TrainStatus::Active);
        assert_eq!(TrainStatus::parse(Some("inactive")), TrainStatus::Inactive);
    }

    #[test]
    fn test_to_event_valid() {
        let event = entry(Some(7), Some("07:00:00"), Some("07:00:20"))
            .to_event()
            .expect("valid entry");
        assert_eq!(event.train_id, 7);
        assert_eq!(event.arrival, Some(25_200));
        assert_eq!(event.departure, Some(DepartureTime::At(25_220)));
        assert_eq!(event.status, TrainStatus::Active);
    }

    #[test]
    fn test_to_event_withdrawn_sentinel() {
        let event = entry(Some(7), Some("07:00:00"), Some("WITHDRAWN"))
            .to_event()
            .expect("valid entry");
        assert!(event.is_withdrawn());
        assert_eq!(event.departure_seconds(), None);
        assert_eq!(event.first_timestamp(), Some(25_200));
    }

    #[test]
    fn test_to_event_rejects_malformed() {
        assert!(entry(None, Some("07:00:00"), None).to_event().is_none());
        assert!(entry(Some(1), Some("7am"), None).to_event().is_none());
        assert!(entry(Some(1), None, Some("later")).to_event().is_none());

        let mut no_direction = entry(Some(1), None, None);
        no_direction.direction = None;
        assert!(no_direction.to_event().is_none());
    }

    #[test]
    fn test_to_event_null_times_allowed() {
        let event = entry(Some(2), None, None).to_event().expect("valid entry");
        assert_eq!(event.arrival, None);
        assert_eq!(event.departure, None);
        assert_eq!(event.first_timestamp(), None);
    }

    #[test]
    fn test_ids_accept_integral_floats() {
        let json = r#"{"Train ID": 1.0, "NStation": 13.0, "Direction": "northbound",
            "Arrival Time": "07:00:00", "Departure Time": "07:00:20"}"#;
        let raw: RawTimetableEntry = serde_json::from_str(json).expect("should deserialize");
        let event = raw.to_event().expect("valid entry");
        assert_eq!(event.train_id, 1);
        assert_eq!(event.station_id, 13);
    }

    #[test]
    fn test_ids_reject_fractional_and_out_of_range() {
        for id in ["1.5", "-1", "-2.0", "4294967296", "\"3\""] {
            let json = format!(r#"{{"Train ID": {id}, "NStation": 2, "Direction": "northbound"}}"#);
            let raw: RawTimetableEntry = serde_json::from_str(&json).expect("should deserialize");
            assert_eq!(raw.train_id, None, "id {id}");
            assert!(raw.to_event().is_none());
        }
    }

    #[test]
    fn test_raw_entry_deserializes_wire_names() {
        let json = r#"{"Train ID": 4, "NStation": 13, "Direction": "southbound",
            "Arrival Time": null, "Departure Time": "08:01:00", "Train Status": "inactive"}"#;
        let raw: RawTimetableEntry = serde_json::from_str(json).expect("should deserialize");
        let event = raw.to_event().expect("valid entry");
        assert_eq!(event.station_id, 13);
        assert_eq!(event.direction, Direction::Southbound);
        assert_eq!(event.status, TrainStatus::Inactive);
    }
}
