#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{ElementKind, ElementOverrides, PartialElement};

const EPSILON: f64 = 1e-9;

fn place(doc: &mut DocStore, x: f64, y: f64, w: f64, h: f64) -> ElementId {
    doc.add(
        ElementKind::Rectangle,
        x,
        y,
        ElementOverrides { width: Some(w), height: Some(h), ..Default::default() },
    )
}

fn apply(doc: &mut DocStore, placements: &[Placement]) {
    for p in placements {
        doc.update(&p.id, &PartialElement::position(p.x, p.y)).unwrap();
    }
}

fn trio(doc: &mut DocStore) -> Vec<ElementId> {
    vec![
        place(doc, 10.0, 50.0, 40.0, 20.0),
        place(doc, 100.0, 0.0, 60.0, 80.0),
        place(doc, 30.0, 120.0, 20.0, 40.0),
    ]
}

fn el<'a>(doc: &'a DocStore, id: &ElementId) -> &'a CanvasElement {
    doc.get(id).unwrap()
}

// =============================================================
// Guards
// =============================================================

#[test]
fn align_needs_two_elements() {
    let mut doc = DocStore::new();
    let a = place(&mut doc, 10.0, 10.0, 50.0, 50.0);
    assert!(align(&doc, &[], Alignment::Left).is_empty());
    assert!(align(&doc, &[a], Alignment::Left).is_empty());
    assert!(align(&doc, &[a, Uuid::new_v4()], Alignment::Left).is_empty());
}

#[test]
fn distribute_needs_three_elements() {
    let mut doc = DocStore::new();
    let a = place(&mut doc, 0.0, 0.0, 10.0, 10.0);
    let b = place(&mut doc, 100.0, 0.0, 10.0, 10.0);
    assert!(distribute(&doc, &[a, b], Axis::Horizontal).is_empty());
}

// =============================================================
// Horizontal alignment
// =============================================================

#[test]
fn align_left_uses_min_x() {
    let mut doc = DocStore::new();
    let ids = trio(&mut doc);
    let moves = align(&doc, &ids, Alignment::Left);
    apply(&mut doc, &moves);
    for id in &ids {
        assert_eq!(el(&doc, id).x, 10.0);
    }
    assert_eq!(el(&doc, &ids[1]).y, 0.0, "left alignment must not move y");
}

#[test]
fn align_right_uses_max_right_edge() {
    let mut doc = DocStore::new();
    let ids = trio(&mut doc);
    let moves = align(&doc, &ids, Alignment::Right);
    apply(&mut doc, &moves);
    for id in &ids {
        let e = el(&doc, id);
        assert_eq!(e.x + e.width, 160.0);
    }
}

#[test]
fn align_center_makes_centers_equal() {
    let mut doc = DocStore::new();
    let ids = trio(&mut doc);
    let moves = align(&doc, &ids, Alignment::Center);
    apply(&mut doc, &moves);
    // Bounding box spans x 10..160, so the center is 85.
    for id in &ids {
        let e = el(&doc, id);
        assert!((e.x + e.width * 0.5 - 85.0).abs() < EPSILON);
    }
}

// =============================================================
// Vertical alignment
// =============================================================

#[test]
fn align_top_middle_bottom() {
    let mut doc = DocStore::new();
    let ids = trio(&mut doc);

    let moves = align(&doc, &ids, Alignment::Top);
    apply(&mut doc, &moves);
    for id in &ids {
        assert_eq!(el(&doc, id).y, 0.0);
    }

    let moves = align(&doc, &ids, Alignment::Bottom);
    apply(&mut doc, &moves);
    for id in &ids {
        let e = el(&doc, id);
        assert_eq!(e.y + e.height, 80.0);
    }

    let moves = align(&doc, &ids, Alignment::Middle);
    apply(&mut doc, &moves);
    let first = el(&doc, &ids[0]);
    let mid = first.y + first.height * 0.5;
    for id in &ids {
        let e = el(&doc, id);
        assert!((e.y + e.height * 0.5 - mid).abs() < EPSILON);
    }
}

// =============================================================
// Idempotence
// =============================================================

#[test]
fn every_alignment_is_idempotent() {
    let alignments = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Top,
        Alignment::Middle,
        Alignment::Bottom,
    ];
    for alignment in alignments {
        let mut doc = DocStore::new();
        let ids = trio(&mut doc);
        let moves = align(&doc, &ids, alignment);
        apply(&mut doc, &moves);
        let once: Vec<(f64, f64)> = ids.iter().map(|id| (el(&doc, id).x, el(&doc, id).y)).collect();
        let moves = align(&doc, &ids, alignment);
        apply(&mut doc, &moves);
        let twice: Vec<(f64, f64)> = ids.iter().map(|id| (el(&doc, id).x, el(&doc, id).y)).collect();
        for (a, b) in once.iter().zip(&twice) {
            assert!((a.0 - b.0).abs() < EPSILON && (a.1 - b.1).abs() < EPSILON, "{alignment:?} not idempotent");
        }
    }
}

// =============================================================
// Distribution
// =============================================================

fn gaps_horizontal(doc: &DocStore, ids: &[ElementId]) -> Vec<f64> {
    let mut els: Vec<&CanvasElement> = ids.iter().map(|id| el(doc, id)).collect();
    els.sort_by(|a, b| a.x.total_cmp(&b.x));
    els.windows(2).map(|w| w[1].x - (w[0].x + w[0].width)).collect()
}

#[test]
fn distribute_horizontal_equalizes_gaps() {
    let mut doc = DocStore::new();
    let ids = vec![
        place(&mut doc, 0.0, 0.0, 50.0, 10.0),
        place(&mut doc, 300.0, 40.0, 100.0, 10.0),
        place(&mut doc, 70.0, 80.0, 30.0, 10.0),
        place(&mut doc, 90.0, 5.0, 20.0, 10.0),
    ];
    let moves = distribute(&doc, &ids, Axis::Horizontal);
    apply(&mut doc, &moves);
    let gaps = gaps_horizontal(&doc, &ids);
    assert_eq!(gaps.len(), 3);
    // Span 0..400, widths sum to 200, three gaps of 200/3.
    for g in &gaps {
        assert!((g - 200.0 / 3.0).abs() < EPSILON, "gaps {gaps:?}");
    }
}

#[test]
fn distribute_keeps_ends_fixed_and_y_untouched() {
    let mut doc = DocStore::new();
    let left = place(&mut doc, 0.0, 7.0, 20.0, 20.0);
    let mid = place(&mut doc, 20.0, 9.0, 20.0, 20.0);
    let right = place(&mut doc, 180.0, 11.0, 20.0, 20.0);
    let moves = distribute(&doc, &[right, mid, left], Axis::Horizontal);
    apply(&mut doc, &moves);
    assert_eq!(el(&doc, &left).x, 0.0);
    assert_eq!(el(&doc, &right).x, 180.0);
    assert!((el(&doc, &mid).x - 90.0).abs() < EPSILON);
    assert_eq!(el(&doc, &mid).y, 9.0);
}

#[test]
fn distribute_vertical_equalizes_gaps() {
    let mut doc = DocStore::new();
    let ids = vec![
        place(&mut doc, 0.0, 0.0, 20.0, 30.0),
        place(&mut doc, 0.0, 35.0, 20.0, 20.0),
        place(&mut doc, 0.0, 200.0, 20.0, 50.0),
    ];
    let moves = distribute(&doc, &ids, Axis::Vertical);
    apply(&mut doc, &moves);
    // Span 0..250, heights 100, two gaps of 75.
    let mid = el(&doc, &ids[1]);
    assert!((mid.y - 105.0).abs() < EPSILON);
    assert_eq!(mid.x, 0.0);
}

#[test]
fn distribute_only_moves_interior_elements() {
    let mut doc = DocStore::new();
    let ids = trio(&mut doc);
    let placements = distribute(&doc, &ids, Axis::Horizontal);
    assert_eq!(placements.len(), 1);
}

#[test]
fn selected_elements_skips_missing() {
    let mut doc = DocStore::new();
    let a = place(&mut doc, 0.0, 0.0, 20.0, 20.0);
    assert_eq!(selected_elements(&doc, &[Uuid::new_v4(), a]).len(), 1);
}
