//! Render projection: maps the document into screen-space boxes.
//!
//! Everything here is a pure function of the transform, the element store and
//! the UI state. The output [`Scene`] is what the browser painter
//! ([`crate::draw`]) and the CLI consume; neither needs to know about canvas
//! space.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Point, Transform};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{CanvasElement, ElementId, ElementKind, ElementStore};
use crate::hit;
use crate::input::UiState;

/// Stroke used when a border string can't be parsed.
const FALLBACK_STROKE: &str = "grey";

/// Background dot grid appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Dot spacing in canvas units.
    pub tile: f64,
}

/// Periodic background pattern, already scaled and phase-shifted for the
/// current transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPattern {
    /// Dot spacing in screen pixels.
    pub tile: f64,
    /// Pattern phase in `[0, tile)`.
    pub offset_x: f64,
    pub offset_y: f64,
}

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One element as it should appear on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenBox {
    pub id: ElementId,
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub stroke: String,
    /// Stroke width in screen pixels.
    pub stroke_width: f64,
    /// Corner radius in screen pixels.
    pub corner_radius: f64,
    pub selected: bool,
}

/// A complete frame: grid, elements in paint order, and selection chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub transform: Transform,
    pub grid: GridPattern,
    pub boxes: Vec<ScreenBox>,
    pub resize_handle: Option<ScreenRect>,
}

/// Project the whole document to screen space.
#[must_use]
pub fn project(transform: &Transform, doc: &ElementStore, ui: &UiState, grid: &GridStyle) -> Scene {
    let boxes = doc
        .elements()
        .iter()
        .map(|el| project_element(transform, el, ui.selected_id == Some(el.id)))
        .collect();

    let resize_handle = ui
        .selected_id
        .and_then(|id| doc.get(&id))
        .map(|el| handle_rect(hit::resize_handle_position(el, transform)));

    Scene {
        transform: *transform,
        grid: grid_pattern(transform, grid.tile),
        boxes,
        resize_handle,
    }
}

/// Project a single element. `screen = canvas * scale + offset`.
#[must_use]
pub fn project_element(transform: &Transform, el: &CanvasElement, selected: bool) -> ScreenBox {
    let origin = transform.to_screen(Point::new(el.x, el.y));
    let width = el.width * transform.scale;
    let height = el.height * transform.scale;
    let (stroke_width, stroke) = parse_border(&el.border);

    ScreenBox {
        id: el.id,
        kind: el.kind,
        x: origin.x,
        y: origin.y,
        width,
        height,
        fill: el.colour.clone(),
        stroke,
        stroke_width: stroke_width * transform.scale,
        corner_radius: corner_radius(&el.border_radius, el.width, el.height) * transform.scale,
        selected,
    }
}

/// Grid pattern for a transform: the tile scales with zoom and its phase
/// follows the pan offset, so a fixed tile appears to move with the content.
#[must_use]
pub fn grid_pattern(transform: &Transform, tile: f64) -> GridPattern {
    let tile = tile * transform.scale;
    if tile <= 0.0 || !tile.is_finite() {
        return GridPattern { tile: 0.0, offset_x: 0.0, offset_y: 0.0 };
    }
    GridPattern {
        tile,
        offset_x: transform.x.rem_euclid(tile),
        offset_y: transform.y.rem_euclid(tile),
    }
}

/// Parse a CSS border shorthand into `(width_px, colour)`.
///
/// Tokens may come in any order (`"2px solid grey"`, `"grey 1px"`). A missing
/// width means 1px; a missing colour falls back to grey. `none` yields a zero
/// width.
#[must_use]
pub fn parse_border(border: &str) -> (f64, String) {
    let mut width = None;
    let mut colour = None;
    for token in border.split_whitespace() {
        if token.eq_ignore_ascii_case("none") || token.eq_ignore_ascii_case("hidden") {
            return (0.0, FALLBACK_STROKE.to_owned());
        }
        if let Some(Ok(px)) = token.strip_suffix("px").map(str::parse::<f64>) {
            width = Some(px.max(0.0));
        } else if !is_border_style(token) && colour.is_none() {
            colour = Some(token.to_owned());
        }
    }
    (width.unwrap_or(1.0), colour.unwrap_or_else(|| FALLBACK_STROKE.to_owned()))
}

fn is_border_style(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "solid" | "dashed" | "dotted" | "double" | "groove" | "ridge" | "inset" | "outset"
    )
}

/// Resolve a CSS border radius (`"6px"` or `"50%"`) against an element's
/// canvas-space size. Percentages use the shorter side, so `50%` on a square
/// is a circle. The result never exceeds half the shorter side.
#[must_use]
pub fn corner_radius(radius: &str, width: f64, height: f64) -> f64 {
    let half = width.min(height).max(0.0) / 2.0;
    let radius = radius.trim();
    let value = if let Some(pct) = radius.strip_suffix('%') {
        pct.trim().parse::<f64>().map_or(0.0, |p| width.min(height) * p / 100.0)
    } else {
        radius.strip_suffix("px").unwrap_or(radius).trim().parse::<f64>().unwrap_or(0.0)
    };
    value.max(0.0).min(half)
}

/// Whether a shape is painted as a full ellipse rather than a rounded
/// rectangle. Only a circle whose radius covers half the shorter side is.
/// Hit-testing and drawing both go through this, in either space.
#[must_use]
pub fn draws_as_ellipse(kind: ElementKind, corner_radius: f64, width: f64, height: f64) -> bool {
    kind == ElementKind::Circle && corner_radius * 2.0 >= width.min(height)
}

fn handle_rect(center: Point) -> ScreenRect {
    ScreenRect {
        x: center.x - HANDLE_RADIUS_PX,
        y: center.y - HANDLE_RADIUS_PX,
        width: HANDLE_RADIUS_PX * 2.0,
        height: HANDLE_RADIUS_PX * 2.0,
    }
}
