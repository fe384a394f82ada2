#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Transform};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{CanvasElement, ElementId, ElementStore};
use crate::render;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `screen_pt`.
///
/// The selected element's resize handle is checked first, since it overhangs
/// the element's corner and may sit on top of a neighbour. Bodies are then
/// checked top-most first (reverse paint order).
#[must_use]
pub fn hit_test(screen_pt: Point, doc: &ElementStore, transform: &Transform, selected_id: Option<ElementId>) -> Option<Hit> {
    if !screen_pt.is_finite() {
        return None;
    }

    if let Some(sel) = selected_id.and_then(|id| doc.get(&id))
        && handle_contains(sel, transform, screen_pt)
    {
        return Some(Hit { element_id: sel.id, part: HitPart::ResizeHandle });
    }

    let canvas_pt = transform.to_canvas(screen_pt);
    doc.elements()
        .iter()
        .rev()
        .find(|el| body_contains(el, canvas_pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}

/// Screen-space centre of an element's resize handle (its bottom-right corner).
#[must_use]
pub fn resize_handle_position(el: &CanvasElement, transform: &Transform) -> Point {
    transform.to_screen(Point::new(el.x + el.width, el.y + el.height))
}

/// Whether `screen_pt` falls on the resize handle of `el`.
#[must_use]
pub fn handle_contains(el: &CanvasElement, transform: &Transform, screen_pt: Point) -> bool {
    let c = resize_handle_position(el, transform);
    (screen_pt.x - c.x).abs() <= HANDLE_RADIUS_PX && (screen_pt.y - c.y).abs() <= HANDLE_RADIUS_PX
}

/// Whether a canvas-space point lies inside the element's shape, as drawn:
/// an ellipse for a round circle, otherwise a rectangle with its resolved
/// corner radius. Edges are inclusive.
#[must_use]
pub fn body_contains(el: &CanvasElement, pt: Point) -> bool {
    let (x, y, w, h) = (el.x, el.y, el.width, el.height);
    if w <= 0.0 || h <= 0.0 {
        return false;
    }
    let r = render::corner_radius(&el.border_radius, w, h);
    if render::draws_as_ellipse(el.kind, r, w, h) {
        let (rx, ry) = (w / 2.0, h / 2.0);
        let dx = (pt.x - (x + rx)) / rx;
        let dy = (pt.y - (y + ry)) / ry;
        return dx * dx + dy * dy <= 1.0;
    }
    if pt.x < x || pt.x > x + w || pt.y < y || pt.y > y + h {
        return false;
    }
    // Nearest point of the inner rectangle inset by `r`; corners are arcs around it.
    let nx = pt.x.max(x + r).min(x + w - r);
    let ny = pt.y.max(y + r).min(y + h - r);
    (pt.x - nx).powi(2) + (pt.y - ny).powi(2) <= r * r
}
