use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mrt_train_map::frame::{assemble_frame, FrameAssembler};
use mrt_train_map::models::{MapSettings, TrackLayout};
use mrt_train_map::phase::classify_phase;
use mrt_train_map::time::parse_clock;
use mrt_train_map::timetable::Timetable;

const SAMPLE_TIMETABLE: &str = include_str!("../assets/sample_timetable.json");

fn benchmark_frame_assembly(c: &mut Criterion) {
    let settings = MapSettings::default();
    let layout = TrackLayout::embedded(&settings).expect("embedded station table");
    let timetable = Timetable::from_json(SAMPLE_TIMETABLE).expect("sample timetable");
    let rush_hour = parse_clock("07:15:00");

    // Benchmark indexing the raw timetable
    c.bench_function("index_timetable", |b| {
        b.iter(|| Timetable::from_json(black_box(SAMPLE_TIMETABLE)));
    });

    // Benchmark phase resolution for every train at one instant
    c.bench_function("classify_all_trains", |b| {
        b.iter(|| {
            timetable
                .trains()
                .map(|(_, events)| classify_phase(black_box(events), black_box(rush_hour), settings.turnaround_hold_secs))
                .count()
        });
    });

    // Benchmark one full frame (what happens on every tick)
    c.bench_function("assemble_frame", |b| {
        b.iter(|| assemble_frame(black_box(&timetable), black_box(&layout), black_box(&settings), black_box(rush_hour)));
    });

    // Benchmark a minute of playback at one tick per simulated second
    c.bench_function("assembler_one_minute", |b| {
        b.iter(|| {
            let mut assembler = FrameAssembler::new();
            let mut emitted = 0;
            for t in rush_hour..rush_hour + 60 {
                if assembler.tick(&timetable, &layout, &settings, black_box(t)).is_some() {
                    emitted += 1;
                }
            }
            emitted
        });
    });
}

criterion_group!(benches, benchmark_frame_assembly);
criterion_main!(benches);
