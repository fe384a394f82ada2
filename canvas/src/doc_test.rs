#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

// =============================================================
// ElementKind
// =============================================================

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ElementKind::Rectangle).unwrap(), "\"rectangle\"");
    assert_eq!(serde_json::to_string(&ElementKind::Circle).unwrap(), "\"circle\"");
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<ElementKind>("\"hexagon\"").is_err());
}

#[test]
fn kind_from_str_accepts_names_case_insensitively() {
    assert_eq!("Rectangle".parse::<ElementKind>(), Ok(ElementKind::Rectangle));
    assert_eq!("rect".parse::<ElementKind>(), Ok(ElementKind::Rectangle));
    assert_eq!(" CIRCLE ".parse::<ElementKind>(), Ok(ElementKind::Circle));
}

#[test]
fn kind_from_str_unknown_is_error() {
    let err = "Triangle".parse::<ElementKind>().unwrap_err();
    assert_eq!(err, DocError::UnknownKind("Triangle".into()));
    assert_eq!(err.to_string(), "unknown element kind: Triangle");
}

#[test]
fn kind_default_sizes() {
    assert_eq!(ElementKind::Rectangle.default_size(), (200.0, 100.0));
    assert_eq!(ElementKind::Circle.default_size(), (100.0, 100.0));
}

// =============================================================
// CanvasElement
// =============================================================

#[test]
fn rectangle_defaults() {
    let el = CanvasElement::with_defaults(ElementKind::Rectangle);
    assert_eq!((el.x, el.y), (500.0, 500.0));
    assert_eq!((el.width, el.height), (200.0, 100.0));
    assert_eq!(el.colour, "white");
    assert_eq!(el.border, "2px solid grey");
    assert_eq!(el.border_radius, "6px");
}

#[test]
fn circle_defaults() {
    let el = CanvasElement::with_defaults(ElementKind::Circle);
    assert_eq!((el.width, el.height), (100.0, 100.0));
    assert_eq!(el.border_radius, "50%");
}

#[test]
fn defaults_get_distinct_ids() {
    let a = CanvasElement::with_defaults(ElementKind::Circle);
    let b = CanvasElement::with_defaults(ElementKind::Circle);
    assert_ne!(a.id, b.id);
}

#[test]
fn element_serializes_camel_case() {
    let mut el = CanvasElement::with_defaults(ElementKind::Circle);
    el.id = Uuid::nil();
    let value = serde_json::to_value(&el).unwrap();
    assert_eq!(value["kind"], json!("circle"));
    assert_eq!(value["borderRadius"], json!("50%"));
    assert!(value.get("border_radius").is_none());
}

#[test]
fn partial_skips_absent_fields() {
    let value = serde_json::to_value(PartialElement::position(1.0, 2.0)).unwrap();
    assert_eq!(value, json!({ "x": 1.0, "y": 2.0 }));
}

#[test]
fn partial_deserializes_from_sparse_json() {
    let p: PartialElement = serde_json::from_value(json!({ "width": 40.0, "borderRadius": "0px" })).unwrap();
    assert_eq!(p.width, Some(40.0));
    assert_eq!(p.border_radius.as_deref(), Some("0px"));
    assert!(p.x.is_none());
}

// =============================================================
// ElementStore: add / get
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = ElementStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.min_size(), 20.0);
}

#[test]
fn add_appends_and_returns_element() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Rectangle).id;
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).map(|e| e.kind), Some(ElementKind::Rectangle));
    assert!(store.contains(&id));
}

#[test]
fn add_preserves_insertion_order() {
    let mut store = ElementStore::new();
    let a = store.add(ElementKind::Rectangle).id;
    let b = store.add(ElementKind::Circle).id;
    let c = store.add(ElementKind::Rectangle).id;
    let order: Vec<_> = store.elements().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![a, b, c]);
}

#[test]
fn add_named_parses_kind() {
    let mut store = ElementStore::new();
    let el = store.add_named("Circle").unwrap();
    assert_eq!(el.kind, ElementKind::Circle);
}

#[test]
fn add_named_unknown_kind_leaves_store_untouched() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Rectangle);
    assert!(matches!(store.add_named("hexagon"), Err(DocError::UnknownKind(_))));
    assert_eq!(store.len(), 1);
}

#[test]
fn get_missing_returns_none() {
    let store = ElementStore::new();
    assert!(store.get(&Uuid::new_v4()).is_none());
}

// =============================================================
// ElementStore: insert
// =============================================================

#[test]
fn insert_replaces_same_id_in_place() {
    let mut store = ElementStore::new();
    let first = store.add(ElementKind::Rectangle).id;
    let second = store.add(ElementKind::Circle).id;
    let mut replacement = store.get(&first).unwrap().clone();
    replacement.colour = "red".into();
    store.insert(replacement);
    assert_eq!(store.len(), 2);
    assert_eq!(store.elements()[0].colour, "red");
    assert_eq!(store.elements()[1].id, second);
}

#[test]
fn insert_floors_undersized_geometry() {
    let mut store = ElementStore::new();
    let mut el = CanvasElement::with_defaults(ElementKind::Rectangle);
    el.width = 3.0;
    el.height = f64::NAN;
    let inserted = store.insert(el);
    assert_eq!(inserted.width, 20.0);
    assert_eq!(inserted.height, 20.0);
}

// =============================================================
// ElementStore: update
// =============================================================

#[test]
fn update_position() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Rectangle).id;
    assert!(store.update(&id, &PartialElement::position(10.0, -20.0)));
    let el = store.get(&id).unwrap();
    assert_eq!((el.x, el.y), (10.0, -20.0));
    assert_eq!((el.width, el.height), (200.0, 100.0));
}

#[test]
fn update_size_floors_at_minimum() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Rectangle).id;
    store.update(&id, &PartialElement::size(5.0, -40.0));
    let el = store.get(&id).unwrap();
    assert_eq!((el.width, el.height), (20.0, 20.0));
}

#[test]
fn update_respects_custom_minimum() {
    let mut store = ElementStore::with_min_size(50.0);
    let id = store.add(ElementKind::Circle).id;
    store.update(&id, &PartialElement::size(10.0, 75.0));
    let el = store.get(&id).unwrap();
    assert_eq!((el.width, el.height), (50.0, 75.0));
}

#[test]
fn with_min_size_rejects_nonsense() {
    assert_eq!(ElementStore::with_min_size(-1.0).min_size(), 20.0);
    assert_eq!(ElementStore::with_min_size(f64::NAN).min_size(), 20.0);
}

#[test]
fn update_style_fields() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Circle).id;
    let patch = PartialElement {
        colour: Some("#ff0000".into()),
        border: Some("1px dashed black".into()),
        border_radius: Some("0px".into()),
        ..Default::default()
    };
    store.update(&id, &patch);
    let el = store.get(&id).unwrap();
    assert_eq!(el.colour, "#ff0000");
    assert_eq!(el.border, "1px dashed black");
    assert_eq!(el.border_radius, "0px");
}

#[test]
fn update_skips_non_finite_numbers() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Rectangle).id;
    store.update(&id, &PartialElement::position(f64::NAN, 7.0));
    let el = store.get(&id).unwrap();
    assert_eq!((el.x, el.y), (500.0, 7.0));
}

#[test]
fn update_missing_returns_false() {
    let mut store = ElementStore::new();
    assert!(!store.update(&Uuid::new_v4(), &PartialElement::position(0.0, 0.0)));
}

#[test]
fn update_empty_patch_is_noop() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Rectangle).id;
    let before = store.get(&id).unwrap().clone();
    assert!(store.update(&id, &PartialElement::default()));
    assert_eq!(store.get(&id).unwrap(), &before);
}

// =============================================================
// ElementStore: remove / clear
// =============================================================

#[cfg(feature = "element-removal")]
#[test]
fn remove_returns_element_and_keeps_order() {
    let mut store = ElementStore::new();
    let a = store.add(ElementKind::Rectangle).id;
    let b = store.add(ElementKind::Circle).id;
    let c = store.add(ElementKind::Rectangle).id;
    assert_eq!(store.remove(&b).map(|e| e.id), Some(b));
    let order: Vec<_> = store.elements().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![a, c]);
}

#[cfg(feature = "element-removal")]
#[test]
fn remove_missing_returns_none() {
    let mut store = ElementStore::new();
    assert!(store.remove(&Uuid::new_v4()).is_none());
}

#[test]
fn clear_drops_everything() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Rectangle);
    store.add(ElementKind::Circle);
    store.clear();
    assert!(store.is_empty());
}
