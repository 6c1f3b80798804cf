use web_sys::CanvasRenderingContext2d;
use crate::frame::Frame;
use crate::time::format_clock;

const OVERLAY_COLOR: &str = "#aaa";
const OVERLAY_FONT: &str = "11px monospace";
const OVERLAY_X: f64 = 10.0;
const OVERLAY_Y: f64 = 16.0;
const OVERLAY_LINE_HEIGHT: f64 = 14.0;

/// Text lines for the debug summary in the top-left corner
#[must_use]
pub fn summary_lines(frame: &Frame) -> Vec<String> {
    let summary = &frame.summary;
    let turning = if summary.turning_around.is_empty() {
        "-".to_string()
    } else {
        summary
            .turning_around
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        format_clock(frame.clock),
        format!(
            "active {}  moving {}  stopped {}  depot {}",
            summary.active, summary.moving, summary.stopped, summary.in_depot
        ),
        format!("turning: {turning}"),
    ]
}

#[allow(clippy::cast_precision_loss)]
pub fn draw_debug_summary(ctx: &CanvasRenderingContext2d, frame: &Frame) {
    ctx.set_fill_style_str(OVERLAY_COLOR);
    ctx.set_font(OVERLAY_FONT);
    for (i, line) in summary_lines(frame).iter().enumerate() {
        let _ = ctx.fill_text(line, OVERLAY_X, OVERLAY_Y + i as f64 * OVERLAY_LINE_HEIGHT);
    }
}
