//! Drawing: paints a projected [`Scene`] to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives an already projected scene (screen-space boxes, grid phase,
//! handle rectangle) and produces pixels; it does no coordinate math beyond
//! device pixel ratio and never mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::render::{self, GridPattern, Scene, ScreenBox, ScreenRect};

const BACKGROUND: &str = "#f3f4f6";
const GRID_DOT: &str = "#99a1af";
const GRID_DOT_RADIUS_PX: f64 = 1.0;
/// Below this spacing the dot grid turns into noise and is skipped.
const MIN_GRID_TILE_PX: f64 = 4.0;

const SELECTION_RING: &str = "#3b82f6";
const SELECTION_RING_PX: f64 = 2.0;
const HANDLE_BORDER: &str = "#fff";
const HANDLE_BORDER_PX: f64 = 2.0;

/// Draw the full scene: background grid, elements in paint order, selection UI.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene, viewport_w: f64, viewport_h: f64, dpr: f64) -> Result<(), JsValue> {
    // Layer 1: clear in CSS pixels.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    // Host code may leave a dash pattern set on the shared context.
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: dot grid.
    draw_grid(ctx, &scene.grid, viewport_w, viewport_h)?;

    // Layer 3: elements, bottom first.
    for b in &scene.boxes {
        draw_box(ctx, b)?;
    }

    // Layer 4: selection ring and resize handle.
    if let Some(b) = scene.boxes.iter().find(|b| b.selected) {
        draw_selection_ring(ctx, b)?;
    }
    if let Some(handle) = scene.resize_handle {
        draw_handle(ctx, handle)?;
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, grid: &GridPattern, viewport_w: f64, viewport_h: f64) -> Result<(), JsValue> {
    if grid.tile < MIN_GRID_TILE_PX || !viewport_w.is_finite() || !viewport_h.is_finite() {
        return Ok(());
    }
    ctx.set_fill_style_str(GRID_DOT);
    ctx.begin_path();
    let mut y = grid.offset_y;
    while y <= viewport_h {
        let mut x = grid.offset_x;
        while x <= viewport_w {
            ctx.move_to(x + GRID_DOT_RADIUS_PX, y);
            ctx.arc(x, y, GRID_DOT_RADIUS_PX, 0.0, 2.0 * PI)?;
            x += grid.tile;
        }
        y += grid.tile;
    }
    ctx.fill();
    Ok(())
}

fn draw_box(ctx: &CanvasRenderingContext2d, b: &ScreenBox) -> Result<(), JsValue> {
    if b.width <= 0.0 || b.height <= 0.0 {
        return Ok(());
    }
    ctx.save();
    if render::draws_as_ellipse(b.kind, b.corner_radius, b.width, b.height) {
        ctx.begin_path();
        ctx.ellipse(b.x + b.width / 2.0, b.y + b.height / 2.0, b.width / 2.0, b.height / 2.0, 0.0, 0.0, 2.0 * PI)?;
    } else {
        rounded_rect_path(ctx, b.x, b.y, b.width, b.height, b.corner_radius)?;
    }

    ctx.set_fill_style_str(&b.fill);
    ctx.fill();

    if b.stroke_width > 0.0 {
        ctx.set_stroke_style_str(&b.stroke);
        ctx.set_line_width(b.stroke_width);
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

fn draw_selection_ring(ctx: &CanvasRenderingContext2d, b: &ScreenBox) -> Result<(), JsValue> {
    let pad = SELECTION_RING_PX / 2.0;
    ctx.save();
    rounded_rect_path(ctx, b.x - pad, b.y - pad, b.width + SELECTION_RING_PX, b.height + SELECTION_RING_PX, b.corner_radius + pad)?;
    ctx.set_stroke_style_str(SELECTION_RING);
    ctx.set_line_width(SELECTION_RING_PX);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_handle(ctx: &CanvasRenderingContext2d, handle: ScreenRect) -> Result<(), JsValue> {
    let r = handle.width.min(handle.height) / 2.0;
    ctx.save();
    ctx.begin_path();
    ctx.arc(handle.x + r, handle.y + r, r, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(SELECTION_RING);
    ctx.fill();
    ctx.set_stroke_style_str(HANDLE_BORDER);
    ctx.set_line_width(HANDLE_BORDER_PX);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

/// Trace a rectangle with rounded corners. `r` is clamped to half the shorter side.
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) -> Result<(), JsValue> {
    let r = r.max(0.0).min(w.min(h) / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}
