use uuid::Uuid;

use super::*;
use crate::doc::{ElementKind, PartialElement};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn identity() -> Transform {
    Transform::default()
}

/// Store with one element of `kind` at `(x, y)` sized `w` x `h`.
fn store_with(kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> (ElementStore, ElementId) {
    let mut store = ElementStore::new();
    let id = store.add(kind).id;
    store.update(&id, &PartialElement { x: Some(x), y: Some(y), width: Some(w), height: Some(h), ..Default::default() });
    (store, id)
}

// =============================================================
// Bodies
// =============================================================

#[test]
fn empty_store_hits_nothing() {
    let store = ElementStore::new();
    assert!(hit_test(pt(0.0, 0.0), &store, &identity(), None).is_none());
}

#[test]
fn rectangle_body_hit() {
    let (store, id) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    let hit = hit_test(pt(50.0, 25.0), &store, &identity(), None);
    assert_eq!(hit, Some(Hit { element_id: id, part: HitPart::Body }));
}

#[test]
fn rectangle_edges_are_inclusive() {
    let (store, _) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    assert!(hit_test(pt(0.0, 25.0), &store, &identity(), None).is_some());
    assert!(hit_test(pt(100.0, 25.0), &store, &identity(), None).is_some());
    assert!(hit_test(pt(50.0, 50.0), &store, &identity(), None).is_some());
    assert!(hit_test(pt(100.1, 25.0), &store, &identity(), None).is_none());
}

#[test]
fn rounded_corners_follow_the_radius() {
    // Default rectangle radius is 6px: the corner centre is (6, 6).
    let (store, _) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    assert!(hit_test(pt(0.5, 0.5), &store, &identity(), None).is_none());
    assert!(hit_test(pt(2.0, 2.0), &store, &identity(), None).is_some());
    assert!(hit_test(pt(99.5, 49.5), &store, &identity(), None).is_none());
}

#[test]
fn circle_with_small_radius_is_hit_like_a_rounded_box() {
    let (mut store, id) = store_with(ElementKind::Circle, 0.0, 0.0, 100.0, 100.0);
    store.update(&id, &PartialElement { border_radius: Some("10%".into()), ..Default::default() });
    // Outside the ellipse, inside the 10px-rounded box that is drawn.
    assert_eq!(hit_test(pt(5.0, 5.0), &store, &identity(), None).map(|h| h.element_id), Some(id));
    assert!(hit_test(pt(0.5, 0.5), &store, &identity(), None).is_none());
    assert!(render::draws_as_ellipse(ElementKind::Circle, 50.0, 100.0, 100.0));
    assert!(!render::draws_as_ellipse(ElementKind::Circle, 10.0, 100.0, 100.0));
}

#[test]
fn circle_corner_is_a_miss() {
    let (store, id) = store_with(ElementKind::Circle, 0.0, 0.0, 100.0, 100.0);
    assert!(hit_test(pt(5.0, 5.0), &store, &identity(), None).is_none());
    assert_eq!(hit_test(pt(50.0, 50.0), &store, &identity(), None).map(|h| h.element_id), Some(id));
    assert!(hit_test(pt(50.0, 1.0), &store, &identity(), None).is_some());
}

#[test]
fn topmost_element_wins() {
    let mut store = ElementStore::new();
    let bottom = store.add(ElementKind::Rectangle).id;
    let top = store.add(ElementKind::Rectangle).id;
    let hit = hit_test(pt(550.0, 550.0), &store, &identity(), None);
    assert_eq!(hit.map(|h| h.element_id), Some(top));
    assert_ne!(bottom, top);
}

#[test]
fn body_hit_respects_transform() {
    let (store, id) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
    let t = Transform { x: 200.0, y: 100.0, scale: 2.0 };
    // Canvas (50, 50) -> screen (300, 200).
    assert_eq!(hit_test(pt(300.0, 200.0), &store, &t, None).map(|h| h.element_id), Some(id));
    // Canvas (-5, 50) is outside.
    assert!(hit_test(pt(190.0, 200.0), &store, &t, None).is_none());
}

#[test]
fn non_finite_point_hits_nothing() {
    let (store, _) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
    assert!(hit_test(pt(f64::NAN, 10.0), &store, &identity(), None).is_none());
}

// =============================================================
// Resize handle
// =============================================================

#[test]
fn handle_only_for_selected_element() {
    let (store, id) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    let unselected = hit_test(pt(98.0, 48.0), &store, &identity(), None);
    assert_eq!(unselected.map(|h| h.part), Some(HitPart::Body));
    let selected = hit_test(pt(98.0, 48.0), &store, &identity(), Some(id));
    assert_eq!(selected, Some(Hit { element_id: id, part: HitPart::ResizeHandle }));
}

#[test]
fn handle_overhangs_corner() {
    let (store, id) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    let hit = hit_test(pt(107.0, 57.0), &store, &identity(), Some(id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::ResizeHandle));
    assert!(hit_test(pt(109.0, 50.0), &store, &identity(), Some(id)).is_none());
}

#[test]
fn handle_size_is_screen_constant() {
    let (store, id) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    let t = Transform { x: 0.0, y: 0.0, scale: 0.5 };
    // Corner at screen (50, 25); slop is 8 screen px regardless of scale.
    assert_eq!(hit_test(pt(57.0, 32.0), &store, &t, Some(id)).map(|h| h.part), Some(HitPart::ResizeHandle));
}

#[test]
fn stale_selection_is_ignored() {
    let (store, _) = store_with(ElementKind::Rectangle, 0.0, 0.0, 100.0, 50.0);
    let hit = hit_test(pt(50.0, 25.0), &store, &identity(), Some(Uuid::new_v4()));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::Body));
}

#[test]
fn resize_handle_position_is_bottom_right_on_screen() {
    let el = CanvasElement::with_defaults(ElementKind::Rectangle);
    let t = Transform { x: 10.0, y: 20.0, scale: 0.5 };
    // (500 + 200) * 0.5 + 10 = 360, (500 + 100) * 0.5 + 20 = 320
    assert_eq!(resize_handle_position(&el, &t), pt(360.0, 320.0));
}
