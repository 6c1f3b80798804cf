use leptos::*;
use leptos_meta::*;
use leptos_use::use_interval_fn;
use crate::clock::SimulationClock;
use crate::components::{clock_controls::ClockControls, map_canvas::TrainMap};
use crate::frame::{Frame, FrameAssembler};
use crate::logging::{log, log_warn};
use crate::models::{MapSettings, TrackLayout};
use crate::time::format_clock;
use crate::timetable::Timetable;

const SAMPLE_TIMETABLE: &str = include_str!("../../assets/sample_timetable.json");

fn load_layout(settings: &MapSettings) -> TrackLayout {
    TrackLayout::embedded(settings).unwrap_or_else(|e| {
        log_warn!("{}", e);
        TrackLayout::from_stations(indexmap::IndexMap::new(), settings)
    })
}

fn load_timetable() -> Timetable {
    let timetable = Timetable::from_json(SAMPLE_TIMETABLE).unwrap_or_else(|e| {
        log_warn!("{}", e);
        Timetable::new()
    });
    log!(
        "Loaded {} trains with {} events: {:?}",
        timetable.len(),
        timetable.event_count(),
        timetable.train_ids().collect::<Vec<_>>()
    );
    if let Some((first, last)) = timetable.service_span() {
        log!("Service runs {} to {}", format_clock(first), format_clock(last));
    }
    timetable
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let settings = MapSettings::default();
    let layout = load_layout(&settings);
    let tick_interval_ms = settings.tick_interval_ms;

    let clock = create_rw_signal(SimulationClock::for_period(settings.service_period));
    let (frame, set_frame) = create_signal(Frame::default());

    let timetable = store_value(load_timetable());
    let assembler = store_value(FrameAssembler::new());
    let stored_layout = store_value(layout.clone());
    let stored_settings = store_value(settings.clone());

    // Rebuild the map whenever the clock moves; unchanged frames are not published
    create_effect(move |_| {
        let t = clock.with(SimulationClock::seconds);
        let next = timetable.with_value(|timetable| {
            stored_layout.with_value(|layout| {
                stored_settings.with_value(|settings| {
                    assembler
                        .try_update_value(|assembler| assembler.tick(timetable, layout, settings, t).cloned())
                        .flatten()
                })
            })
        });
        if let Some(next) = next {
            set_frame.set(next);
        }
    });

    let _ = use_interval_fn(
        move || {
            if clock.with_untracked(SimulationClock::is_playing) {
                clock.update(|c| c.advance(tick_interval_ms));
            }
        },
        tick_interval_ms,
    );

    view! {
        <Stylesheet id="leptos" href="/pkg/mrt_train_map.css"/>
        <Title text="MRT-3 Train Map"/>

        <div class="app">
            <TrainMap frame=frame layout=layout settings=settings.clone() />
            <ClockControls clock=clock initial_period=settings.service_period />
        </div>
    }
}
