use web_sys::CanvasRenderingContext2d;
use crate::models::{Direction, TrainVisualState};

// Train marker constants
const TRAIN_LENGTH: f64 = 18.0;
const TRAIN_WIDTH: f64 = 7.0;
const TRAIN_NOSE: f64 = 4.0;
const TRAIN_OUTLINE_COLOR: &str = "#fff";
const TRAIN_OUTLINE_WIDTH: f64 = 1.0;
const TRAIN_LABEL_COLOR: &str = "#fff";
const TRAIN_LABEL_FONT: &str = "bold 9px monospace";
const TRAIN_LABEL_OFFSET: f64 = 8.0;

const SOUTHBOUND_COLOR: &str = "#4da6ff";
const NORTHBOUND_COLOR: &str = "#ffcc33";
const STOPPED_COLOR: &str = "#66cc66";
const TURNING_COLOR: &str = "#ff8c1a";
const DEPOT_TRAIN_COLOR: &str = "#888";

#[must_use]
pub fn train_color(train: &TrainVisualState) -> &'static str {
    if train.is_in_depot {
        DEPOT_TRAIN_COLOR
    } else if train.is_turning_around {
        TURNING_COLOR
    } else if train.is_stopped {
        STOPPED_COLOR
    } else {
        match train.direction {
            Direction::Southbound => SOUTHBOUND_COLOR,
            Direction::Northbound => NORTHBOUND_COLOR,
        }
    }
}

pub fn draw_trains(ctx: &CanvasRenderingContext2d, trains: &[TrainVisualState]) {
    for train in trains {
        draw_train_marker(ctx, train);
    }

    ctx.set_fill_style_str(TRAIN_LABEL_COLOR);
    ctx.set_font(TRAIN_LABEL_FONT);
    ctx.set_text_align("center");
    for train in trains {
        let _ = ctx.fill_text(&train.id.to_string(), train.x, train.y - TRAIN_LABEL_OFFSET);
    }
    ctx.set_text_align("start");
}

fn draw_train_marker(ctx: &CanvasRenderingContext2d, train: &TrainVisualState) {
    let half_length = TRAIN_LENGTH / 2.0;
    let half_width = TRAIN_WIDTH / 2.0;

    ctx.save();
    let _ = ctx.translate(train.x, train.y);
    let _ = ctx.rotate(train.rotation.to_radians());

    // Body with a pointed nose on the heading side
    ctx.begin_path();
    ctx.move_to(-half_length, -half_width);
    ctx.line_to(half_length, -half_width);
    ctx.line_to(half_length + TRAIN_NOSE, 0.0);
    ctx.line_to(half_length, half_width);
    ctx.line_to(-half_length, half_width);
    ctx.close_path();

    ctx.set_fill_style_str(train_color(train));
    ctx.fill();
    ctx.set_stroke_style_str(TRAIN_OUTLINE_COLOR);
    ctx.set_line_width(TRAIN_OUTLINE_WIDTH);
    ctx.stroke();

    ctx.restore();
}
