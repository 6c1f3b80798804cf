use web_sys::CanvasRenderingContext2d;
use crate::models::{Direction, MapSettings, TrackLayout};

// Track constants
const TRACK_COLOR: &str = "#555";
const TRACK_WIDTH: f64 = 3.0;
// Cubic control offset that puts the loop apex exactly `loop_offset` past the terminus
const LOOP_CONTROL_FACTOR: f64 = 4.0 / 3.0;

// Station constants
const STATION_FILL_COLOR: &str = "#1e1e1e";
const STATION_OUTLINE_COLOR: &str = "#ddd";
const STATION_RADIUS: f64 = 4.0;
const STATION_LABEL_COLOR: &str = "#ddd";
const STATION_LABEL_FONT: &str = "9px monospace";
const STATION_LABEL_OFFSET: f64 = 14.0;

// Depot constants
const DEPOT_COLOR: &str = "rgba(255, 255, 255, 0.06)";
const DEPOT_LABEL_COLOR: &str = "#777";
const DEPOT_LABEL_FONT: &str = "9px monospace";
const DEPOT_HALF_HEIGHT: f64 = 10.0;
const DEPOT_MIN_HALF_WIDTH: f64 = 60.0;

/// Horizontal room the map needs, turnaround loops included
pub fn map_extent(layout: &TrackLayout, settings: &MapSettings) -> (f64, f64) {
    let mut xs = layout.stations().map(|(_, station)| station.x);
    let Some(first) = xs.next() else {
        return (0.0, 0.0);
    };
    let (min_x, max_x) = xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
    (min_x - settings.loop_offset, max_x + settings.loop_offset)
}

pub fn draw_tracks(ctx: &CanvasRenderingContext2d, layout: &TrackLayout, settings: &MapSettings) {
    let (Some((_, first)), Some((_, last))) = (layout.stations().next(), layout.stations().last()) else {
        return;
    };
    let north_y = layout.track_y(Direction::Northbound);
    let south_y = layout.track_y(Direction::Southbound);
    let control = settings.loop_offset * LOOP_CONTROL_FACTOR;

    ctx.set_stroke_style_str(TRACK_COLOR);
    ctx.set_line_width(TRACK_WIDTH);

    for y in [north_y, south_y] {
        ctx.begin_path();
        ctx.move_to(first.x, y);
        ctx.line_to(last.x, y);
        ctx.stroke();
    }

    // Turnaround loops past both termini
    ctx.begin_path();
    ctx.move_to(first.x, north_y);
    ctx.bezier_curve_to(first.x - control, north_y, first.x - control, south_y, first.x, south_y);
    ctx.stroke();

    ctx.begin_path();
    ctx.move_to(last.x, south_y);
    ctx.bezier_curve_to(last.x + control, south_y, last.x + control, north_y, last.x, north_y);
    ctx.stroke();
}

pub fn draw_stations(ctx: &CanvasRenderingContext2d, layout: &TrackLayout) {
    let north_y = layout.track_y(Direction::Northbound);
    let south_y = layout.track_y(Direction::Southbound);

    ctx.set_font(STATION_LABEL_FONT);
    ctx.set_text_align("center");

    for (_, station) in layout.stations() {
        ctx.set_fill_style_str(STATION_FILL_COLOR);
        ctx.set_stroke_style_str(STATION_OUTLINE_COLOR);
        ctx.set_line_width(1.5);
        for y in [north_y, south_y] {
            ctx.begin_path();
            let _ = ctx.arc(station.x, y, STATION_RADIUS, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
            ctx.stroke();
        }

        ctx.set_fill_style_str(STATION_LABEL_COLOR);
        let _ = ctx.fill_text(&station.name, station.x, north_y - STATION_LABEL_OFFSET);
    }

    ctx.set_text_align("start");
}

/// Shaded strip under the depot station, wide enough for `count` parked trains
#[allow(clippy::cast_precision_loss)]
pub fn draw_depot(ctx: &CanvasRenderingContext2d, layout: &TrackLayout, settings: &MapSettings, count: usize) {
    let center_x = layout.depot_center_x();
    let half_width = (count as f64 * settings.depot_slot_spacing / 2.0 + settings.depot_slot_spacing)
        .max(DEPOT_MIN_HALF_WIDTH);

    ctx.set_fill_style_str(DEPOT_COLOR);
    ctx.fill_rect(
        center_x - half_width,
        settings.depot_y - DEPOT_HALF_HEIGHT,
        half_width * 2.0,
        DEPOT_HALF_HEIGHT * 2.0,
    );

    ctx.set_fill_style_str(DEPOT_LABEL_COLOR);
    ctx.set_font(DEPOT_LABEL_FONT);
    let _ = ctx.fill_text(
        &depot_label(layout, settings),
        center_x - half_width,
        settings.depot_y + DEPOT_HALF_HEIGHT + 10.0,
    );
}

/// Depot caption naming the station it sits under
#[must_use]
pub fn depot_label(layout: &TrackLayout, settings: &MapSettings) -> String {
    layout
        .station_name(settings.depot_station_id)
        .map_or_else(|| "DEPOT".to_string(), |name| format!("DEPOT ({name})"))
}
