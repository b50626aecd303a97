#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;

fn style(value: Value) -> Style {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn rect_at(store: &mut DocStore, x: f64, y: f64) -> ElementId {
    store.add(ElementKind::Rectangle, x, y, ElementOverrides::default())
}

fn with_z(store: &mut DocStore, z: i64) -> ElementId {
    store.add(ElementKind::Rectangle, 0.0, 0.0, ElementOverrides { z_index: Some(z), ..Default::default() })
}

fn z_of(store: &DocStore, id: &ElementId) -> i64 {
    store.get(id).unwrap().z_index
}

// =============================================================
// ElementKind
// =============================================================

#[test]
fn kind_serde_uses_lowercase_labels() {
    let cases = [
        (ElementKind::Rectangle, "\"rectangle\""),
        (ElementKind::Circle, "\"circle\""),
        (ElementKind::Navbar, "\"navbar\""),
        (ElementKind::Frame, "\"frame\""),
        (ElementKind::Divider, "\"divider\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        assert_eq!(format!("\"{}\"", kind.as_str()), expected);
    }
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<ElementKind>("\"hexagon\"").is_err());
}

#[test]
fn kind_defaults_respect_min_size() {
    let kinds = [
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Text,
        ElementKind::Button,
        ElementKind::Container,
        ElementKind::Navbar,
        ElementKind::Card,
        ElementKind::Frame,
        ElementKind::Image,
        ElementKind::Comment,
        ElementKind::Input,
        ElementKind::Divider,
    ];
    for kind in kinds {
        let (w, h) = kind.default_size();
        assert!(w >= MIN_SIZE && h >= MIN_SIZE, "{kind:?} default too small");
    }
}

// =============================================================
// CanvasElement serde
// =============================================================

#[test]
fn element_serializes_with_type_and_camel_case() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 1.0, 2.0);
    let value = serde_json::to_value(store.get(&id).unwrap()).unwrap();
    assert_eq!(value["type"], "rectangle");
    assert_eq!(value["zIndex"], 0);
    assert_eq!(value["visible"], true);
    assert_eq!(value["locked"], false);
    assert!(value.get("content").is_none());
}

#[test]
fn element_deserialize_fills_flag_defaults() {
    let raw = json!({
        "id": Uuid::new_v4(),
        "type": "card",
        "x": 1.0, "y": 2.0, "width": 30.0, "height": 40.0,
        "zIndex": 3
    });
    let el: CanvasElement = serde_json::from_value(raw).unwrap();
    assert!(el.visible);
    assert!(!el.locked);
    assert!(el.style.is_empty());
    assert_eq!(el.content, None);
}

// =============================================================
// add
// =============================================================

#[test]
fn add_uses_kind_defaults() {
    let mut store = DocStore::new();
    let id = store.add(ElementKind::Button, 5.0, 6.0, ElementOverrides::default());
    let el = store.get(&id).unwrap();
    assert_eq!(el.kind, ElementKind::Button);
    assert_eq!((el.x, el.y), (5.0, 6.0));
    assert_eq!((el.width, el.height), ElementKind::Button.default_size());
    assert_eq!(el.content.as_deref(), Some("Button"));
    assert_eq!(el.style["fill"], "#2563EB");
    assert!(el.visible);
    assert!(!el.locked);
}

#[test]
fn add_overrides_replace_defaults() {
    let mut store = DocStore::new();
    let overrides = ElementOverrides {
        width: Some(150.0),
        height: Some(100.0),
        content: Some("Hello".into()),
        style: Some(style(json!({ "fill": "#000000", "opacity": 0.5 }))),
        locked: Some(true),
        ..Default::default()
    };
    let id = store.add(ElementKind::Button, 10.0, 10.0, overrides);
    let el = store.get(&id).unwrap();
    assert_eq!((el.width, el.height), (150.0, 100.0));
    assert_eq!(el.content.as_deref(), Some("Hello"));
    assert_eq!(el.style["fill"], "#000000");
    assert_eq!(el.style["opacity"], 0.5);
    // Untouched default keys survive the merge.
    assert_eq!(el.style["color"], "#FFFFFF");
    assert!(el.locked);
}

#[test]
fn add_floors_tiny_sizes() {
    let mut store = DocStore::new();
    let id = store.add(
        ElementKind::Rectangle,
        0.0,
        0.0,
        ElementOverrides { width: Some(3.0), height: Some(-10.0), ..Default::default() },
    );
    let el = store.get(&id).unwrap();
    assert_eq!(el.width, MIN_SIZE);
    assert_eq!(el.height, MIN_SIZE);
}

#[test]
fn add_stacks_above_existing() {
    let mut store = DocStore::new();
    let a = with_z(&mut store, 7);
    let b = rect_at(&mut store, 0.0, 0.0);
    let c = rect_at(&mut store, 0.0, 0.0);
    assert_eq!(z_of(&store, &a), 7);
    assert_eq!(z_of(&store, &b), 8);
    assert_eq!(z_of(&store, &c), 9);
}

#[test]
fn add_first_element_gets_zero() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 0.0, 0.0);
    assert_eq!(z_of(&store, &id), 0);
}

#[test]
fn add_generates_unique_ids() {
    let mut store = DocStore::new();
    let a = rect_at(&mut store, 0.0, 0.0);
    let b = rect_at(&mut store, 0.0, 0.0);
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
}

// =============================================================
// update
// =============================================================

#[test]
fn update_applies_present_fields_only() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 1.0, 2.0);
    store.update(&id, &PartialElement { x: Some(50.0), visible: Some(false), ..Default::default() }).unwrap();
    let el = store.get(&id).unwrap();
    assert_eq!(el.x, 50.0);
    assert_eq!(el.y, 2.0);
    assert!(!el.visible);
}

#[test]
fn update_merges_style_shallowly() {
    let mut store = DocStore::new();
    let id = store.add(
        ElementKind::Rectangle,
        0.0,
        0.0,
        ElementOverrides { style: Some(style(json!({ "fill": "red", "stroke": "blue" }))), ..Default::default() },
    );
    let partial = PartialElement { style: Some(style(json!({ "fill": "green", "shadow": true }))), ..Default::default() };
    store.update(&id, &partial).unwrap();
    let el = store.get(&id).unwrap();
    assert_eq!(el.style["fill"], "green");
    assert_eq!(el.style["stroke"], "blue");
    assert_eq!(el.style["shadow"], true);
}

#[test]
fn update_null_style_value_deletes_key() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 0.0, 0.0);
    let partial = PartialElement { style: Some(style(json!({ "stroke": null }))), ..Default::default() };
    store.update(&id, &partial).unwrap();
    assert!(!store.get(&id).unwrap().style.contains_key("stroke"));
}

#[test]
fn update_floors_size() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 0.0, 0.0);
    store.update(&id, &PartialElement { width: Some(5.0), height: Some(25.0), ..Default::default() }).unwrap();
    let el = store.get(&id).unwrap();
    assert_eq!(el.width, MIN_SIZE);
    assert_eq!(el.height, 25.0);
}

#[test]
fn update_missing_reports_not_found() {
    let mut store = DocStore::new();
    let ghost = Uuid::new_v4();
    assert_eq!(store.update(&ghost, &PartialElement::position(1.0, 1.0)), Err(DocError::NotFound(ghost)));
    assert!(store.is_empty());
}

#[test]
fn update_can_unlock_locked_element() {
    let mut store = DocStore::new();
    let id = store.add(ElementKind::Rectangle, 0.0, 0.0, ElementOverrides { locked: Some(true), ..Default::default() });
    store.update(&id, &PartialElement { locked: Some(false), ..Default::default() }).unwrap();
    assert!(!store.get(&id).unwrap().locked);
}

#[test]
fn custom_min_size_applies() {
    let mut store = DocStore::with_min_size(50.0);
    let id = store.add(ElementKind::Rectangle, 0.0, 0.0, ElementOverrides { width: Some(30.0), ..Default::default() });
    assert_eq!(store.get(&id).unwrap().width, 50.0);
    assert_eq!(store.min_size(), 50.0);
}

// =============================================================
// move_by
// =============================================================

#[test]
fn move_by_adds_delta() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 10.0, 10.0);
    store.move_by(&id, 5.0, -20.0).unwrap();
    let el = store.get(&id).unwrap();
    assert_eq!((el.x, el.y), (15.0, -10.0));
}

#[test]
fn move_by_locked_is_rejected_and_unchanged() {
    let mut store = DocStore::new();
    let id = store.add(ElementKind::Rectangle, 10.0, 10.0, ElementOverrides { locked: Some(true), ..Default::default() });
    assert_eq!(store.move_by(&id, 5.0, 5.0), Err(DocError::Locked(id)));
    let el = store.get(&id).unwrap();
    assert_eq!((el.x, el.y), (10.0, 10.0));
}

#[test]
fn move_by_missing_is_not_found() {
    let mut store = DocStore::new();
    let ghost = Uuid::new_v4();
    assert_eq!(store.move_by(&ghost, 1.0, 1.0), Err(DocError::NotFound(ghost)));
}

// =============================================================
// toggles
// =============================================================

#[test]
fn toggle_lock_and_visibility_flip_flags() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 0.0, 0.0);
    assert_eq!(store.toggle_lock(&id), Ok(true));
    assert_eq!(store.toggle_lock(&id), Ok(false));
    assert_eq!(store.toggle_visibility(&id), Ok(false));
    assert!(!store.get(&id).unwrap().visible);
    assert!(store.toggle_lock(&Uuid::new_v4()).is_err());
}

// =============================================================
// remove / bulk_remove
// =============================================================

#[test]
fn remove_returns_element() {
    let mut store = DocStore::new();
    let id = rect_at(&mut store, 0.0, 0.0);
    let removed = store.remove(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(store.remove(&id).is_none());
}

#[test]
fn remove_locked_element_succeeds() {
    let mut store = DocStore::new();
    let id = store.add(ElementKind::Rectangle, 0.0, 0.0, ElementOverrides { locked: Some(true), ..Default::default() });
    assert!(store.remove(&id).is_some());
}

#[test]
fn bulk_remove_reports_present_ids() {
    let mut store = DocStore::new();
    let a = rect_at(&mut store, 0.0, 0.0);
    let b = rect_at(&mut store, 0.0, 0.0);
    let keep = rect_at(&mut store, 0.0, 0.0);
    let ghost = Uuid::new_v4();
    let removed = store.bulk_remove(&[a, ghost, b]);
    assert_eq!(removed, vec![a, b]);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&keep));
}

// =============================================================
// duplicate
// =============================================================

#[test]
fn duplicate_copies_everything_but_id_and_z() {
    let mut store = DocStore::new();
    let src = store.add(
        ElementKind::Card,
        12.0,
        34.0,
        ElementOverrides { content: Some("Pricing".into()), ..Default::default() },
    );
    let copies = store.duplicate(&[src]);
    assert_eq!(copies.len(), 1);
    let (a, b) = (store.get(&src).unwrap(), store.get(&copies[0]).unwrap());
    assert_ne!(a.id, b.id);
    assert_eq!((a.x, a.y, a.width, a.height), (b.x, b.y, b.width, b.height));
    assert_eq!(a.content, b.content);
    assert_eq!(a.style, b.style);
    assert_eq!(a.kind, b.kind);
}

#[test]
fn duplicate_stacks_above_every_existing_element() {
    let mut store = DocStore::new();
    let low = with_z(&mut store, -5);
    let high = with_z(&mut store, 40);
    let copies = store.duplicate(&[low, high]);
    assert_eq!(z_of(&store, &copies[0]), 41);
    assert_eq!(z_of(&store, &copies[1]), 42);
}

#[test]
fn duplicate_skips_missing() {
    let mut store = DocStore::new();
    let a = rect_at(&mut store, 0.0, 0.0);
    let copies = store.duplicate(&[Uuid::new_v4(), a]);
    assert_eq!(copies.len(), 1);
    assert_eq!(store.len(), 2);
}

// =============================================================
// bring_to_front / send_to_back
// =============================================================

#[test]
fn bring_to_front_assigns_above_max_in_given_order() {
    let mut store = DocStore::new();
    let a = with_z(&mut store, 1);
    let b = with_z(&mut store, 2);
    let c = with_z(&mut store, 3);
    let restacked = store.bring_to_front(&[b, a]);
    assert_eq!(restacked, vec![b, a]);
    assert_eq!(z_of(&store, &b), 4);
    assert_eq!(z_of(&store, &a), 5);
    assert_eq!(z_of(&store, &c), 3);
}

#[test]
fn send_to_back_assigns_below_min_in_given_order() {
    let mut store = DocStore::new();
    let a = with_z(&mut store, 1);
    let b = with_z(&mut store, 2);
    let c = with_z(&mut store, 3);
    store.send_to_back(&[c, b]);
    assert_eq!(z_of(&store, &c), -1);
    assert_eq!(z_of(&store, &b), 0);
    assert_eq!(z_of(&store, &a), 1);
    let order: Vec<ElementId> = store.sorted_elements().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![c, b, a]);
}

#[test]
fn restack_skips_missing_and_duplicate_ids() {
    let mut store = DocStore::new();
    let a = with_z(&mut store, 0);
    let restacked = store.bring_to_front(&[Uuid::new_v4(), a, a]);
    assert_eq!(restacked, vec![a]);
    assert_eq!(z_of(&store, &a), 1);
}

// =============================================================
// ordering and snapshot
// =============================================================

#[test]
fn sorted_elements_orders_by_z() {
    let mut store = DocStore::new();
    let top = with_z(&mut store, 10);
    let bottom = with_z(&mut store, -3);
    let mid = with_z(&mut store, 4);
    let order: Vec<ElementId> = store.sorted_elements().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![bottom, mid, top]);
}

#[test]
fn load_snapshot_replaces_contents() {
    let mut store = DocStore::new();
    rect_at(&mut store, 0.0, 0.0);
    let mut other = DocStore::new();
    let kept = rect_at(&mut other, 5.0, 5.0);
    let elements: Vec<CanvasElement> = other.sorted_elements().into_iter().cloned().collect();
    store.load_snapshot(elements);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&kept));
}

#[test]
fn max_and_min_z_on_empty_store() {
    let store = DocStore::new();
    assert_eq!(store.max_z(), None);
    assert_eq!(store.min_z(), None);
}
