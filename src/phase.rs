//! Per-train phase resolution.
//!
//! A train's sorted event list plus the clock value map to exactly one
//! [`Phase`]. Consecutive event pairs are walked in order and each pair is
//! tested against [`PAIR_CHECKS`] in precedence order; the first match wins.
//! When no pair matches the train is either not in service yet or has run off
//! the end of its schedule, in which case it holds its last valid position.

use crate::constants::MIN_PROGRESS_DENOMINATOR;
use crate::models::{Direction, TimetableEvent, TrackLayout, TrainStatus, TrainVisualState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Before the train's first timestamp
    NotYetActive,
    /// Permanently out of circulation; position comes from the depot layout
    InDepot { station_id: u32, direction: Direction },
    /// Reversing on the loop past a terminus
    TurningAround {
        station_id: u32,
        incoming: Direction,
        outgoing: Direction,
        progress: f64,
    },
    Dwelling { station_id: u32, direction: Direction },
    Moving {
        from_station: u32,
        to_station: u32,
        direction: Direction,
        progress: f64,
    },
}

type PairCheck = fn(&TimetableEvent, Option<&TimetableEvent>, i64) -> Option<Phase>;

/// Phase checks for one event pair, highest precedence first
///
/// In-depot must precede the others so an inactive train's final departure is
/// never read as the start of a moving segment.
const PAIR_CHECKS: [PairCheck; 4] = [in_depot, turning_around, dwelling, moving];

/// Classify a train's phase at clock value `t`
///
/// `events` must be sorted chronologically (see `Timetable`).
/// `turnaround_hold_secs` bounds how long a schedule that ends on a
/// turnaround keeps the train on the loop.
#[must_use]
pub fn classify_phase(events: &[TimetableEvent], t: i64, turnaround_hold_secs: i64) -> Phase {
    let matched = events.iter().enumerate().find_map(|(i, current)| {
        let next = events.get(i + 1);
        PAIR_CHECKS.iter().find_map(|check| check(current, next, t))
    });
    if let Some(phase) = matched {
        return phase;
    }

    match first_known_timestamp(events) {
        Some(first) if t >= first => fallback(events, t, turnaround_hold_secs),
        _ => Phase::NotYetActive,
    }
}

/// Same station, opposite directions, both with real departures
#[must_use]
pub fn is_turnaround_pair(a: &TimetableEvent, b: &TimetableEvent) -> bool {
    a.station_id == b.station_id
        && b.direction == a.direction.opposite()
        && a.departure_seconds().is_some()
        && b.departure_seconds().is_some()
}

/// `(t - start) / max(1, end - start)`, clamped to `[0, 1]`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_ratio(t: i64, start: i64, end: i64) -> f64 {
    let duration = (end - start).max(MIN_PROGRESS_DENOMINATOR);
    ((t - start) as f64 / duration as f64).clamp(0.0, 1.0)
}

fn in_depot(current: &TimetableEvent, _next: Option<&TimetableEvent>, t: i64) -> Option<Phase> {
    let leaves_service_at = if current.is_withdrawn() {
        current.arrival
    } else if current.status == TrainStatus::Inactive {
        current.departure_seconds()
    } else {
        None
    }?;

    (t >= leaves_service_at).then_some(Phase::InDepot {
        station_id: current.station_id,
        direction: current.direction,
    })
}

fn turning_around(current: &TimetableEvent, next: Option<&TimetableEvent>, t: i64) -> Option<Phase> {
    let next = next.filter(|next| is_turnaround_pair(current, next))?;
    let start = current.departure_seconds()?;
    let end = next.departure_seconds()?;

    (start <= t && t < end).then(|| Phase::TurningAround {
        station_id: current.station_id,
        incoming: current.direction,
        outgoing: next.direction,
        progress: progress_ratio(t, start, end),
    })
}

fn dwelling(current: &TimetableEvent, _next: Option<&TimetableEvent>, t: i64) -> Option<Phase> {
    let arrival = current.arrival?;
    let departure = current.departure_seconds()?;

    (arrival <= t && t < departure).then_some(Phase::Dwelling {
        station_id: current.station_id,
        direction: current.direction,
    })
}

fn moving(current: &TimetableEvent, next: Option<&TimetableEvent>, t: i64) -> Option<Phase> {
    if current.status != TrainStatus::Active {
        return None;
    }
    let departure = current.departure_seconds()?;
    let next = next?;
    let next_arrival = next.arrival?;

    (departure <= t && t < next_arrival).then(|| Phase::Moving {
        from_station: current.station_id,
        to_station: next.station_id,
        direction: current.direction,
        progress: progress_ratio(t, departure, next_arrival),
    })
}

fn first_known_timestamp(events: &[TimetableEvent]) -> Option<i64> {
    events.iter().find_map(TimetableEvent::first_timestamp)
}

/// Schedule gap or exhaustion: hold the last state the schedule reached
fn fallback(events: &[TimetableEvent], t: i64, turnaround_hold_secs: i64) -> Phase {
    let Some(anchor_idx) = events
        .iter()
        .rposition(|e| e.first_timestamp().is_some_and(|ts| ts <= t))
    else {
        return Phase::NotYetActive;
    };
    let anchor = &events[anchor_idx];

    if anchor_idx + 1 == events.len() && anchor_idx > 0 {
        let previous = &events[anchor_idx - 1];
        let still_on_loop = anchor
            .departure_seconds()
            .is_some_and(|end| t >= end && t - end <= turnaround_hold_secs);

        if still_on_loop && is_turnaround_pair(previous, anchor) {
            return Phase::TurningAround {
                station_id: anchor.station_id,
                incoming: previous.direction,
                outgoing: anchor.direction,
                progress: 1.0,
            };
        }
    }

    Phase::Dwelling {
        station_id: anchor.station_id,
        direction: anchor.direction,
    }
}

impl Phase {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotYetActive => "not-yet-active",
            Self::InDepot { .. } => "in-depot",
            Self::TurningAround { .. } => "turning-around",
            Self::Dwelling { .. } => "dwelling",
            Self::Moving { .. } => "moving",
        }
    }

    #[must_use]
    pub const fn is_in_depot(&self) -> bool {
        matches!(self, Self::InDepot { .. })
    }

    /// Turn the phase into drawable state
    ///
    /// `depot_slot` is only read for `InDepot`; the depot layout owns that
    /// position.
    #[must_use]
    pub fn to_visual_state(&self, train_id: u32, layout: &TrackLayout, depot_slot: (f64, f64)) -> TrainVisualState {
        match *self {
            Self::NotYetActive => TrainVisualState::inactive(train_id, Direction::Southbound),
            Self::InDepot { direction, .. } => TrainVisualState {
                id: train_id,
                x: depot_slot.0,
                y: depot_slot.1,
                direction,
                is_stopped: true,
                is_active: true,
                is_turning_around: false,
                is_in_depot: true,
                rotation: direction.rotation(),
                current_station_index: None,
                turnaround_progress: None,
            },
            Self::TurningAround { station_id, incoming, outgoing, progress } => {
                let (x, y) = layout.loop_position(station_id, incoming);
                TrainVisualState {
                    id: train_id,
                    x,
                    y,
                    direction: outgoing,
                    is_stopped: false,
                    is_active: true,
                    is_turning_around: true,
                    is_in_depot: false,
                    rotation: (incoming.rotation() + 180.0 * progress) % 360.0,
                    current_station_index: None,
                    turnaround_progress: Some(progress),
                }
            }
            Self::Dwelling { station_id, direction } => TrainVisualState {
                id: train_id,
                x: layout.station_x(station_id),
                y: layout.track_y(direction),
                direction,
                is_stopped: true,
                is_active: true,
                is_turning_around: false,
                is_in_depot: false,
                rotation: direction.rotation(),
                current_station_index: layout.station_index(station_id),
                turnaround_progress: None,
            },
            Self::Moving { from_station, to_station, direction, progress } => {
                let from_x = layout.station_x(from_station);
                let to_x = layout.station_x(to_station);
                let rotation = if to_x > from_x {
                    Direction::Southbound.rotation()
                } else if to_x < from_x {
                    Direction::Northbound.rotation()
                } else {
                    direction.rotation()
                };
                TrainVisualState {
                    id: train_id,
                    x: layout.interpolate_x(from_station, to_station, progress),
                    y: layout.track_y(direction),
                    direction,
                    is_stopped: false,
                    is_active: true,
                    is_turning_around: false,
                    is_in_depot: false,
                    rotation,
                    current_station_index: None,
                    turnaround_progress: None,
                }
            }
        }
    }
}
