use crate::logging::{log, log_warn};
use crate::models::{RawTimetableEntry, TimetableEvent};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Per-train event sequences, each sorted chronologically
///
/// Trains are kept in a `BTreeMap` so iteration is always ascending by id;
/// depot slot numbering depends on that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timetable {
    trains: BTreeMap<u32, Vec<TimetableEvent>>,
}

impl Timetable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index validated events by train id and sort each train's schedule
    #[must_use]
    pub fn from_events(events: impl IntoIterator<Item = TimetableEvent>) -> Self {
        let mut trains: BTreeMap<u32, Vec<TimetableEvent>> = BTreeMap::new();
        for event in events {
            trains.entry(event.train_id).or_default().push(event);
        }

        for schedule in trains.values_mut() {
            // sort_by is stable: same-timestamp turnaround rows keep input order
            schedule.sort_by(compare_events);
        }

        Self { trains }
    }

    /// Index raw backend entries, silently dropping malformed ones
    #[must_use]
    pub fn from_entries(entries: &[RawTimetableEntry]) -> Self {
        let events: Vec<TimetableEvent> = entries.iter().filter_map(RawTimetableEntry::to_event).collect();

        let dropped = entries.len() - events.len();
        if dropped > 0 {
            log_warn!("Dropped {} malformed timetable entries", dropped);
        }

        let timetable = Self::from_events(events);
        log!("Indexed timetable: {} trains, {} events", timetable.len(), timetable.event_count());
        timetable
    }

    /// Parse a JSON array of backend entries
    ///
    /// Entries that do not match the wire format are dropped like any other
    /// malformed entry; only a document that is not a JSON array fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON array
    pub fn from_json(json: &str) -> Result<Self, String> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse timetable: {e}"))?;

        let entries: Vec<RawTimetableEntry> = values
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .collect();

        Ok(Self::from_entries(&entries))
    }

    /// Train ids in ascending order
    pub fn train_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.trains.keys().copied()
    }

    /// Trains with their sorted schedules, ascending by id
    pub fn trains(&self) -> impl Iterator<Item = (u32, &[TimetableEvent])> {
        self.trains.iter().map(|(&id, events)| (id, events.as_slice()))
    }

    #[must_use]
    pub fn events(&self, train_id: u32) -> Option<&[TimetableEvent]> {
        self.trains.get(&train_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.trains.values().map(Vec::len).sum()
    }

    /// Earliest and latest timestamps across the whole timetable
    #[must_use]
    pub fn service_span(&self) -> Option<(i64, i64)> {
        self.trains
            .values()
            .flatten()
            .flat_map(|event| [event.arrival, event.departure_seconds()])
            .flatten()
            .fold(None, |span, t| match span {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }
}

/// Chronological order: arrival first (missing last), then departure with
/// withdrawals and missing departures last
fn compare_events(a: &TimetableEvent, b: &TimetableEvent) -> Ordering {
    let arrival_key = |e: &TimetableEvent| e.arrival.unwrap_or(i64::MAX);
    let departure_key = |e: &TimetableEvent| e.departure.map_or(i64::MAX, |d| d.sort_key());

    arrival_key(a)
        .cmp(&arrival_key(b))
        .then_with(|| departure_key(a).cmp(&departure_key(b)))
}
