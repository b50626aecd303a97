//! Engine tuning knobs.
//!
//! Every field has a default taken from [`crate::consts`], so a host can
//! deserialize a partial JSON object and only override what it cares about.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HANDLE_RADIUS_PX, MAX_ZOOM, MIN_SIZE, MIN_ZOOM, NUDGE_STEP, NUDGE_STEP_LARGE, WHEEL_ZOOM_SENSITIVITY,
};

/// Runtime configuration for an [`crate::engine::EngineCore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum element width/height in world units.
    pub min_size: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Zoom delta per wheel unit while ctrl/meta is held.
    pub wheel_zoom_sensitivity: f64,
    /// Resize handle hit slop in screen pixels.
    pub handle_radius_px: f64,
    /// Arrow-key nudge in world units.
    pub nudge_step: f64,
    /// Arrow-key nudge with shift held.
    pub nudge_step_large: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            handle_radius_px: HANDLE_RADIUS_PX,
            nudge_step: NUDGE_STEP,
            nudge_step_large: NUDGE_STEP_LARGE,
        }
    }
}

impl EngineConfig {
    /// Repair values that would break engine invariants.
    ///
    /// Zoom bounds must be positive and ordered; sizes and steps must be
    /// non-negative. Offending fields fall back to their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        let non_negative = |v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };

        let mut min_zoom = positive(self.min_zoom, defaults.min_zoom);
        let mut max_zoom = positive(self.max_zoom, defaults.max_zoom);
        if min_zoom > max_zoom {
            min_zoom = defaults.min_zoom;
            max_zoom = defaults.max_zoom;
        }

        Self {
            min_size: non_negative(self.min_size, defaults.min_size),
            min_zoom,
            max_zoom,
            wheel_zoom_sensitivity: non_negative(self.wheel_zoom_sensitivity, defaults.wheel_zoom_sensitivity),
            handle_radius_px: non_negative(self.handle_radius_px, defaults.handle_radius_px),
            nudge_step: non_negative(self.nudge_step, defaults.nudge_step),
            nudge_step_large: non_negative(self.nudge_step_large, defaults.nudge_step_large),
        }
    }
}
