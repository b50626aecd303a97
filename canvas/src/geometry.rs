//! Stateless coordinate math between screen space and world space.
//!
//! Screen space is what pointer events report (CSS pixels, origin at the
//! canvas top-left). World space is where element geometry lives and does not
//! change when the user pans or zooms. The mapping is
//! `world = (screen - pan) / zoom`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// A point (or a delta) in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive containment test; points on the border count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Smallest rect covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Convert a screen-space point to world coordinates.
#[must_use]
pub fn screen_to_world(screen: Point, camera: &Camera) -> Point {
    Point {
        x: (screen.x - camera.pan_x) / camera.zoom,
        y: (screen.y - camera.pan_y) / camera.zoom,
    }
}

/// Convert a world-space point to screen coordinates.
#[must_use]
pub fn world_to_screen(world: Point, camera: &Camera) -> Point {
    Point {
        x: world.x * camera.zoom + camera.pan_x,
        y: world.y * camera.zoom + camera.pan_y,
    }
}

/// Convert a screen-space delta to a world-space delta. Pan does not apply to deltas.
#[must_use]
pub fn world_delta(screen_delta: Point, zoom: f64) -> Point {
    Point {
        x: screen_delta.x / zoom,
        y: screen_delta.y / zoom,
    }
}
