//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height an element may have, in world units.
pub const MIN_SIZE: f64 = 20.0;

// ── Viewport ────────────────────────────────────────────────────

/// Lower zoom bound (10%).
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound (500%).
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom change per wheel unit while the zoom modifier is held. Linear, not exponential.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.01;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Keyboard ────────────────────────────────────────────────────

/// Arrow-key nudge distance in world units.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key nudge distance with shift held.
pub const NUDGE_STEP_LARGE: f64 = 10.0;
