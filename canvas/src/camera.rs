#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::geometry::{self, Point};

/// Viewport transform for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), always within the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        geometry::screen_to_world(screen, self)
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        geometry::world_to_screen(world, self)
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set zoom, clamped to the default bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.set_zoom_within(zoom, MIN_ZOOM, MAX_ZOOM);
    }

    /// Set zoom, clamped to `[min, max]`.
    ///
    /// A non-finite request, or bounds that are non-finite or inverted, leave
    /// zoom unchanged.
    pub fn set_zoom_within(&mut self, zoom: f64, min: f64, max: f64) {
        if !zoom.is_finite() || !min.is_finite() || !max.is_finite() || min > max {
            return;
        }
        self.zoom = zoom.clamp(min, max);
    }

    /// Add a signed linear delta to zoom, then clamp to the default bounds.
    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Add a signed linear delta to zoom, then clamp to `[min, max]`.
    pub fn zoom_by_within(&mut self, delta: f64, min: f64, max: f64) {
        self.set_zoom_within(self.zoom + delta, min, max);
    }

    /// Shift the pan offset. Pan is unconstrained.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Set the pan offset absolutely.
    pub fn pan_to(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    /// Return to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
