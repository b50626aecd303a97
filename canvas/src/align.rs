//! Alignment and distribution of a multi-selection.
//!
//! Pure functions: they read the selected elements and return the positions
//! each one should move to. The engine applies the result through
//! [`DocStore::update`]. Fewer than two selected elements produce no
//! placements; distribution additionally needs three, since the two ends
//! never move.

#[cfg(test)]
#[path = "align_test.rs"]
mod align_test;

use serde::{Deserialize, Serialize};

use crate::doc::{CanvasElement, DocStore, ElementId};
use crate::geometry::Rect;

/// Which edge or center line to align on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    /// Horizontal centers.
    Center,
    Right,
    Top,
    /// Vertical centers.
    Middle,
    Bottom,
}

/// Distribution direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Target top-left position for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
}

/// Live elements among `ids`, in the order given. Missing ids are skipped.
#[must_use]
pub fn selected_elements<'a>(doc: &'a DocStore, ids: &[ElementId]) -> Vec<&'a CanvasElement> {
    ids.iter().filter_map(|id| doc.get(id)).collect()
}

fn bounding_box(elements: &[&CanvasElement]) -> Option<Rect> {
    let mut iter = elements.iter().map(|el| el.bounds());
    let first = iter.next()?;
    Some(iter.fold(first, |acc, r| acc.union(&r)))
}

/// Compute placements that align the selected elements.
#[must_use]
pub fn align(doc: &DocStore, ids: &[ElementId], alignment: Alignment) -> Vec<Placement> {
    let elements = selected_elements(doc, ids);
    if elements.len() < 2 {
        return Vec::new();
    }
    let Some(bbox) = bounding_box(&elements) else {
        return Vec::new();
    };
    let center = bbox.center();

    elements
        .iter()
        .map(|el| {
            let (x, y) = match alignment {
                Alignment::Left => (bbox.x, el.y),
                Alignment::Right => (bbox.right() - el.width, el.y),
                Alignment::Center => (center.x - el.width * 0.5, el.y),
                Alignment::Top => (el.x, bbox.y),
                Alignment::Bottom => (el.x, bbox.bottom() - el.height),
                Alignment::Middle => (el.x, center.y - el.height * 0.5),
            };
            Placement { id: el.id, x, y }
        })
        .collect()
}

/// Compute placements that equalize the gaps between consecutive elements.
///
/// Elements are ordered by their leading coordinate (`x` or `y`); the first
/// and last stay fixed and the rest are laid out so every gap equals
/// `(span - total size) / (n - 1)`. Gaps may be negative when the elements
/// overlap more than the span allows.
#[must_use]
pub fn distribute(doc: &DocStore, ids: &[ElementId], axis: Axis) -> Vec<Placement> {
    let mut elements = selected_elements(doc, ids);
    if elements.len() < 3 {
        return Vec::new();
    }

    let lead = |el: &CanvasElement| match axis {
        Axis::Horizontal => el.x,
        Axis::Vertical => el.y,
    };
    let size = |el: &CanvasElement| match axis {
        Axis::Horizontal => el.width,
        Axis::Vertical => el.height,
    };

    elements.sort_by(|a, b| lead(a).total_cmp(&lead(b)).then_with(|| a.id.cmp(&b.id)));

    let n = elements.len();
    let first = elements[0];
    let last = elements[n - 1];
    let span = lead(last) + size(last) - lead(first);
    let total: f64 = elements.iter().map(|el| size(el)).sum();
    #[allow(clippy::cast_precision_loss)]
    let gap = (span - total) / (n - 1) as f64;

    let mut cursor = lead(first) + size(first) + gap;
    let mut out = Vec::with_capacity(n - 2);
    for el in &elements[1..n - 1] {
        let (x, y) = match axis {
            Axis::Horizontal => (cursor, el.y),
            Axis::Vertical => (el.x, cursor),
        };
        out.push(Placement { id: el.id, x, y });
        cursor += size(el) + gap;
    }
    out
}
