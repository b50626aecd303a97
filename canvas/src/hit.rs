//! Hit-testing in world space.
//!
//! Resize handles of a single selected element win over element bodies.
//! Bodies are scanned topmost first in paint order; hidden and locked
//! elements are skipped.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Camera;
use crate::doc::{DocStore, ElementId};
use crate::geometry::{Point, Rect};
use crate::selection::Selection;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// All eight anchors, clockwise from north.
    pub const ALL: [ResizeAnchor; 8] = [
        ResizeAnchor::N,
        ResizeAnchor::Ne,
        ResizeAnchor::E,
        ResizeAnchor::Se,
        ResizeAnchor::S,
        ResizeAnchor::Sw,
        ResizeAnchor::W,
        ResizeAnchor::Nw,
    ];

    /// Dragging this handle moves the right edge.
    #[must_use]
    pub fn east(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Dragging this handle moves the left edge.
    #[must_use]
    pub fn west(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Dragging this handle moves the top edge.
    #[must_use]
    pub fn north(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Dragging this handle moves the bottom edge.
    #[must_use]
    pub fn south(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// CSS cursor name for hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    /// World-space handle position on `bounds`.
    #[must_use]
    pub fn position(self, bounds: &Rect) -> Point {
        let cx = bounds.x + bounds.width * 0.5;
        let cy = bounds.y + bounds.height * 0.5;
        let (x, y) = match self {
            Self::N => (cx, bounds.y),
            Self::Ne => (bounds.right(), bounds.y),
            Self::E => (bounds.right(), cy),
            Self::Se => (bounds.right(), bounds.bottom()),
            Self::S => (cx, bounds.bottom()),
            Self::Sw => (bounds.x, bounds.bottom()),
            Self::W => (bounds.x, cy),
            Self::Nw => (bounds.x, bounds.y),
        };
        Point::new(x, y)
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Find the resize handle of `bounds` under `world_pt`, if any.
///
/// `radius_world` is the half-size of each square handle in world units.
#[must_use]
pub fn handle_at(world_pt: Point, bounds: &Rect, radius_world: f64) -> Option<ResizeAnchor> {
    ResizeAnchor::ALL.into_iter().find(|anchor| {
        let pos = anchor.position(bounds);
        (world_pt.x - pos.x).abs() <= radius_world && (world_pt.y - pos.y).abs() <= radius_world
    })
}

/// Topmost visible, unlocked element whose bounding box contains `world_pt`.
///
/// "Topmost" is the last element in paint order: highest `z_index`, with
/// ties broken by the same id ordering the renderer uses.
#[must_use]
pub fn topmost_at(world_pt: Point, doc: &DocStore) -> Option<ElementId> {
    doc.sorted_elements()
        .into_iter()
        .rev()
        .find(|el| el.is_interactive() && el.bounds().contains(world_pt))
        .map(|el| el.id)
}

/// Test which element (if any) is under `world_pt`.
///
/// Resize handles are only live when exactly one element is selected and are
/// checked before bodies, so a handle overlapping another element still wins.
#[must_use]
pub fn hit_test(
    world_pt: Point,
    doc: &DocStore,
    camera: &Camera,
    selection: &Selection,
    handle_radius_px: f64,
) -> Option<Hit> {
    if let Some(id) = selection.single() {
        if let Some(el) = doc.get(&id).filter(|el| el.is_interactive()) {
            let radius_world = camera.screen_dist_to_world(handle_radius_px);
            if let Some(anchor) = handle_at(world_pt, &el.bounds(), radius_world) {
                return Some(Hit { element_id: id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }
    topmost_at(world_pt, doc).map(|element_id| Hit { element_id, part: HitPart::Body })
}
