//! Resize handle math.
//!
//! A resize is always computed from the geometry captured at pointer-down
//! plus the total world delta since then, never accumulated frame to frame.
//! The edge opposite the dragged handle stays put, including when the size
//! hits the floor.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::geometry::{Point, Rect};
use crate::hit::ResizeAnchor;

/// New bounds after dragging `anchor` by `delta` (world units) from `start`.
///
/// `e`/`s` handles grow with a positive delta; `w`/`n` handles grow with a
/// negative delta and shift the origin by the (clamped) size change so the
/// right/bottom edge stays anchored. Width and height never drop below
/// `min_size`.
#[must_use]
pub fn resize_rect(anchor: ResizeAnchor, start: Rect, delta: Point, min_size: f64) -> Rect {
    let mut out = start;

    if anchor.east() {
        out.width = (start.width + delta.x).max(min_size);
    } else if anchor.west() {
        out.width = (start.width - delta.x).max(min_size);
        out.x = start.x + (start.width - out.width);
    }

    if anchor.south() {
        out.height = (start.height + delta.y).max(min_size);
    } else if anchor.north() {
        out.height = (start.height - delta.y).max(min_size);
        out.y = start.y + (start.height - out.height);
    }

    out
}
