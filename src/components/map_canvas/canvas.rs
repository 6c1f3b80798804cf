use leptos::*;
use wasm_bindgen::{JsCast, closure::Closure};
use crate::frame::Frame;
use crate::logging::log_warn;
use crate::models::{MapSettings, TrackLayout};
use super::{overlay, track, trains};

// Map margins in layout units
const SIDE_MARGIN: f64 = 20.0;
const BOTTOM_MARGIN: f64 = 30.0;
const CANVAS_BACKGROUND: &str = "#1e1e1e";

#[component]
pub fn TrainMap(
    frame: ReadSignal<Frame>,
    layout: TrackLayout,
    settings: MapSettings,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let layout = store_value(layout);
    let settings = store_value(settings);
    let (render_requested, set_render_requested) = create_signal(false);

    create_effect(move |_| {
        frame.with(|_| ());

        if render_requested.get_untracked() {
            return;
        }
        let Some(window) = web_sys::window() else { return };
        set_render_requested.set(true);

        let callback = Closure::once(move || {
            set_render_requested.set(false);
            let Some(canvas) = canvas_ref.get_untracked() else { return };
            frame.with_untracked(|current| {
                layout.with_value(|layout| {
                    settings.with_value(|settings| render_map(&canvas, layout, settings, current));
                });
            });
        });

        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        callback.forget();
    });

    view! {
        <div class="map-container">
            <canvas node_ref=canvas_ref class="train-map"></canvas>
        </div>
    }
}

fn render_map(
    canvas: &HtmlElement<html::Canvas>,
    layout: &TrackLayout,
    settings: &MapSettings,
    frame: &Frame,
) {
    let canvas_element: &web_sys::HtmlCanvasElement = canvas;

    let (min_x, max_x) = track::map_extent(layout, settings);
    let map_width = (max_x - min_x + SIDE_MARGIN * 2.0).max(1.0);
    let map_height = settings.depot_y + BOTTOM_MARGIN;

    // Browser dimensions are always non-negative
    #[allow(clippy::cast_sign_loss)]
    let container_width = canvas_element.client_width() as u32;
    if container_width > 0 {
        let scale = f64::from(container_width) / map_width;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (map_height * scale).ceil() as u32;
        canvas_element.set_width(container_width);
        canvas_element.set_height(height);
    }

    let canvas_width = f64::from(canvas_element.width());
    let canvas_height = f64::from(canvas_element.height());
    let scale = canvas_width / map_width;

    let Ok(Some(context)) = canvas_element.get_context("2d") else {
        log_warn!("Failed to get 2D context");
        return;
    };

    let Ok(ctx) = context.dyn_into::<web_sys::CanvasRenderingContext2d>() else {
        log_warn!("Failed to cast to 2D rendering context");
        return;
    };

    ctx.set_fill_style_str(CANVAS_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    ctx.save();
    let _ = ctx.scale(scale, scale);
    let _ = ctx.translate(SIDE_MARGIN - min_x, 0.0);

    track::draw_depot(&ctx, layout, settings, frame.summary.in_depot);
    track::draw_tracks(&ctx, layout, settings);
    track::draw_stations(&ctx, layout);
    trains::draw_trains(&ctx, &frame.trains);

    ctx.restore();

    overlay::draw_debug_summary(&ctx, frame);
}
