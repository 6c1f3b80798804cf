use crate::depot::DepotLayout;
use crate::logging::log;
use crate::models::{MapSettings, TrackLayout, TrainVisualState};
use crate::phase::{classify_phase, Phase};
use crate::timetable::Timetable;
use serde::Serialize;

/// Counts shown in the debug overlay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DebugSummary {
    pub active: usize,
    pub moving: usize,
    pub stopped: usize,
    pub in_depot: usize,
    pub turning_around: Vec<u32>,
}

impl DebugSummary {
    #[must_use]
    pub fn from_trains(trains: &[TrainVisualState]) -> Self {
        let mut summary = Self::default();
        for train in trains.iter().filter(|t| t.is_active) {
            summary.active += 1;
            if train.is_moving() {
                summary.moving += 1;
            }
            if train.is_stopped {
                summary.stopped += 1;
            }
            if train.is_in_depot {
                summary.in_depot += 1;
            }
            if train.is_turning_around {
                summary.turning_around.push(train.id);
            }
        }
        summary
    }
}

/// Every active train at one clock value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub clock: i64,
    pub trains: Vec<TrainVisualState>,
    pub summary: DebugSummary,
}

/// Build the frame for clock value `t`
///
/// Two passes: classify every train (ascending id) and count the depot, then
/// place depot trains in slot order and render the rest.
#[must_use]
pub fn assemble_frame(timetable: &Timetable, layout: &TrackLayout, settings: &MapSettings, t: i64) -> Frame {
    let phases: Vec<(u32, Phase)> = timetable
        .trains()
        .map(|(id, events)| (id, classify_phase(events, t, settings.turnaround_hold_secs)))
        .collect();

    let depot_count = phases.iter().filter(|(_, phase)| phase.is_in_depot()).count();
    let depot = DepotLayout::for_frame(layout, settings, depot_count);

    let mut next_slot = 0;
    let trains: Vec<TrainVisualState> = phases
        .iter()
        .filter(|(_, phase)| *phase != Phase::NotYetActive)
        .map(|(id, phase)| {
            let slot = if phase.is_in_depot() {
                let slot = depot.slot(next_slot);
                next_slot += 1;
                slot
            } else {
                (0.0, 0.0)
            };
            phase.to_visual_state(*id, layout, slot)
        })
        .collect();

    let summary = DebugSummary::from_trains(&trains);
    Frame { clock: t, trains, summary }
}

/// Per-tick driver that suppresses frames identical to the previous one
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    previous: Option<Frame>,
}

impl FrameAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the frame for `t`; `None` when no train changed since the last emitted frame
    pub fn tick(&mut self, timetable: &Timetable, layout: &TrackLayout, settings: &MapSettings, t: i64) -> Option<&Frame> {
        let frame = assemble_frame(timetable, layout, settings, t);

        let unchanged = self
            .previous
            .as_ref()
            .is_some_and(|previous| previous.trains == frame.trains);
        if unchanged {
            return None;
        }

        if self.previous.as_ref().map(|p| p.summary.in_depot) != Some(frame.summary.in_depot) {
            log!("Depot now holds {} trains", frame.summary.in_depot);
        }

        self.previous = Some(frame);
        self.previous.as_ref()
    }

    /// Last frame handed out, if any
    #[must_use]
    pub const fn current(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Forget the previous frame so the next tick always emits
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_clock;

    fn layout(settings: &MapSettings) -> TrackLayout {
        TrackLayout::embedded(settings).expect("embedded table")
    }

    fn timetable(json: &str) -> Timetable {
        Timetable::from_json(json).expect("valid timetable")
    }

    const MIXED_SERVICE: &str = r#"[
        {"Train ID": 1, "NStation": 1, "Direction": "southbound", "Arrival Time": "07:00:00", "Departure Time": "07:00:20"},
        {"Train ID": 1, "NStation": 5, "Direction": "southbound", "Arrival Time": "07:05:00", "Departure Time": "07:05:20"},
        {"Train ID": 2, "NStation": 13, "Direction": "southbound", "Arrival Time": null, "Departure Time": "07:00:00"},
        {"Train ID": 2, "NStation": 13, "Direction": "northbound", "Arrival Time": null, "Departure Time": "07:04:00"},
        {"Train ID": 3, "NStation": 4, "Direction": "northbound", "Arrival Time": "06:50:00", "Departure Time": "06:55:00", "Train Status": "inactive"},
        {"Train ID": 4, "NStation": 9, "Direction": "northbound", "Arrival Time": "06:40:00", "Departure Time": "06:45:00", "Train Status": "inactive"},
        {"Train ID": 5, "NStation": 2, "Direction": "northbound", "Arrival Time": "09:00:00", "Departure Time": "09:00:30"}
    ]"#;

    #[test]
    fn test_empty_timetable_gives_empty_frame() {
        let settings = MapSettings::default();
        let frame = assemble_frame(&Timetable::new(), &layout(&settings), &settings, parse_clock("08:00:00"));
        assert!(frame.trains.is_empty());
        assert_eq!(frame.summary, DebugSummary::default());
    }

    #[test]
    fn test_frame_excludes_inactive_trains() {
        let settings = MapSettings::default();
        let frame = assemble_frame(&timetable(MIXED_SERVICE), &layout(&settings), &settings, parse_clock("07:02:00"));
        let ids: Vec<u32> = frame.trains.iter().map(|t| t.id).collect();
        // Train 5 has not started yet
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(frame.trains.iter().all(|t| t.is_active));
    }

    #[test]
    fn test_debug_summary_counts() {
        let settings = MapSettings::default();
        let frame = assemble_frame(&timetable(MIXED_SERVICE), &layout(&settings), &settings, parse_clock("07:02:00"));
        assert_eq!(frame.summary.active, 4);
        assert_eq!(frame.summary.moving, 1);
        assert_eq!(frame.summary.stopped, 2);
        assert_eq!(frame.summary.in_depot, 2);
        assert_eq!(frame.summary.turning_around, vec![2]);
    }

    #[test]
    fn test_depot_pair_symmetric_about_reference_station() {
        let settings = MapSettings::default();
        let layout = layout(&settings);
        let frame = assemble_frame(&timetable(MIXED_SERVICE), &layout, &settings, parse_clock("07:02:00"));
        let depot: Vec<&TrainVisualState> = frame.trains.iter().filter(|t| t.is_in_depot).collect();
        assert_eq!(depot.len(), 2);
        // Ascending id order fills slots left to right
        assert_eq!(depot[0].id, 3);
        assert!(depot[0].x < depot[1].x);
        let center = layout.station_x(settings.depot_station_id);
        assert!(((depot[0].x + depot[1].x) / 2.0 - center).abs() < 1e-9);
        assert!(depot.iter().all(|t| t.y == settings.depot_y && t.current_station_index.is_none()));
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let settings = MapSettings::default();
        let layout = layout(&settings);
        let timetable = timetable(MIXED_SERVICE);
        let t = parse_clock("07:03:17");
        assert_eq!(
            assemble_frame(&timetable, &layout, &settings, t),
            assemble_frame(&timetable, &layout, &settings, t)
        );
    }

    #[test]
    fn test_out_of_order_calls_are_independent() {
        let settings = MapSettings::default();
        let layout = layout(&settings);
        let timetable = timetable(MIXED_SERVICE);
        let early = assemble_frame(&timetable, &layout, &settings, parse_clock("07:01:00"));
        let _late = assemble_frame(&timetable, &layout, &settings, parse_clock("09:30:00"));
        assert_eq!(assemble_frame(&timetable, &layout, &settings, parse_clock("07:01:00")), early);
    }

    #[test]
    fn test_assembler_suppresses_identical_frames() {
        let settings = MapSettings::default();
        let layout = layout(&settings);
        let timetable = timetable(MIXED_SERVICE);
        let mut assembler = FrameAssembler::new();

        assert!(assembler.tick(&timetable, &layout, &settings, parse_clock("07:02:00")).is_some());
        assert!(assembler.tick(&timetable, &layout, &settings, parse_clock("07:02:00")).is_none());
        assert!(assembler.tick(&timetable, &layout, &settings, parse_clock("07:02:01")).is_some());
        assert_eq!(assembler.current().map(|f| f.clock), Some(parse_clock("07:02:01")));

        assembler.reset();
        assert!(assembler.tick(&timetable, &layout, &settings, parse_clock("07:02:01")).is_some());
    }

    #[test]
    fn test_sample_service_mid_morning() {
        let settings = MapSettings::default();
        let layout = layout(&settings);
        let timetable = timetable(include_str!("../assets/sample_timetable.json"));
        assert_eq!(timetable.len(), 6);
        // The row without a train id is dropped
        assert_eq!(timetable.event_count(), 350);

        let frame = assemble_frame(&timetable, &layout, &settings, parse_clock("07:30:00"));
        assert_eq!(frame.trains.len(), 6);
        let depot: Vec<u32> = frame.trains.iter().filter(|t| t.is_in_depot).map(|t| t.id).collect();
        assert_eq!(depot, vec![5, 6]);
        assert_eq!(frame.summary.active, 6);
    }

    #[test]
    fn test_parked_trains_do_not_emit_new_frames() {
        let settings = MapSettings::default();
        let layout = layout(&settings);
        let timetable = timetable(
            r#"[{"Train ID": 9, "NStation": 3, "Direction": "northbound", "Arrival Time": "07:00:00", "Departure Time": "07:00:30"}]"#,
        );
        let mut assembler = FrameAssembler::new();
        assert!(assembler.tick(&timetable, &layout, &settings, parse_clock("07:10:00")).is_some());
        assert!(assembler.tick(&timetable, &layout, &settings, parse_clock("07:20:00")).is_none());
    }
}
