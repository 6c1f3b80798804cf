use leptos::{component, view, ev, IntoView, RwSignal, SignalGet, SignalSet, SignalUpdate, SignalWith, SignalWithUntracked, CollectView, create_signal, create_node_ref, event_target_value, html::Input};
use crate::clock::SimulationClock;
use crate::constants::{SKIP_STEP_SECONDS, SPEED_MULTIPLIERS};
use crate::models::ServicePeriod;

// The scrubber works in thousandths of the view window
const SCRUBBER_STEPS: f64 = 1000.0;

#[component]
#[must_use]
pub fn ClockControls(
    clock: RwSignal<SimulationClock>,
    initial_period: ServicePeriod,
) -> impl IntoView {
    let (period, set_period) = create_signal(initial_period);
    let time_input_ref = create_node_ref::<Input>();

    let on_period_change = move |ev: ev::Event| {
        let Ok(index) = event_target_value(&ev).parse::<usize>() else { return };
        let Some(&next) = ServicePeriod::ALL.get(index) else { return };
        set_period.set(next);
        clock.update(|c| c.set_window(next.window()));
    };

    view! {
        <div class="clock-controls">
            <button
                class="clock-button"
                title="Back one minute"
                on:click=move |_| clock.update(|c| c.skip(-SKIP_STEP_SECONDS))
            >
                <i class="fa-solid fa-backward-step"></i>
            </button>
            <button
                class="clock-button"
                title=move || if clock.with(SimulationClock::is_playing) { "Pause" } else { "Play" }
                on:click=move |_| clock.update(SimulationClock::toggle)
            >
                <i class=move || {
                    if clock.with(SimulationClock::is_playing) { "fa-solid fa-pause" } else { "fa-solid fa-play" }
                }></i>
            </button>
            <button
                class="clock-button"
                title="Forward one minute"
                on:click=move |_| clock.update(|c| c.skip(SKIP_STEP_SECONDS))
            >
                <i class="fa-solid fa-forward-step"></i>
            </button>

            <input
                type="text"
                class="time-input"
                node_ref=time_input_ref
                prop:value=move || clock.with(SimulationClock::current_time)
                on:change=move |ev| {
                    let before = clock.with_untracked(SimulationClock::seconds);
                    clock.update(|c| c.seek(&event_target_value(&ev)));
                    // Unparseable input leaves the clock alone; show the real time again
                    if clock.with_untracked(SimulationClock::seconds) == before {
                        if let Some(input) = time_input_ref.get() {
                            input.set_value(&clock.with_untracked(SimulationClock::current_time));
                        }
                    }
                }
            />

            <input
                type="range"
                class="time-scrubber"
                min="0"
                max=SCRUBBER_STEPS.to_string()
                prop:value=move || (clock.with(SimulationClock::progress) * SCRUBBER_STEPS).round().to_string()
                on:input=move |ev| {
                    if let Ok(step) = event_target_value(&ev).parse::<f64>() {
                        clock.update(|c| c.seek_fraction(step / SCRUBBER_STEPS));
                    }
                }
            />

            <select
                class="speed-select"
                title="Playback speed"
                on:change=move |ev| {
                    if let Ok(speed) = event_target_value(&ev).parse::<f64>() {
                        clock.update(|c| c.set_speed(speed));
                    }
                }
            >
                {SPEED_MULTIPLIERS.iter().map(|&speed| view! {
                    <option
                        value=speed.to_string()
                        prop:selected=move || clock.with(SimulationClock::speed) == speed
                    >
                        {format!("{speed}x")}
                    </option>
                }).collect_view()}
            </select>

            <select class="period-select" title="Service period" on:change=on_period_change>
                {ServicePeriod::ALL.iter().enumerate().map(|(index, &option)| view! {
                    <option
                        value=index.to_string()
                        prop:selected=move || period.get() == option
                    >
                        {option.label()}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}
