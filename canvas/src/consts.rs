//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lower zoom bound used when no configuration overrides it.
pub const DEFAULT_MIN_SCALE: f64 = 0.3;

/// Upper zoom bound used when no configuration overrides it.
pub const DEFAULT_MAX_SCALE: f64 = 2.0;

/// Increment applied by the toolbar zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 0.1;

/// Wheel zoom factor when scrolling down (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.98;

/// Wheel zoom factor when scrolling up (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.02;

// ── Elements ────────────────────────────────────────────────────

/// Minimum width and height of an element in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Canvas-space position of a freshly added element.
pub const DEFAULT_ELEMENT_X: f64 = 500.0;
pub const DEFAULT_ELEMENT_Y: f64 = 500.0;

pub const DEFAULT_FILL: &str = "white";
pub const DEFAULT_BORDER: &str = "2px solid grey";

// ── Hit-testing ─────────────────────────────────────────────────

/// Half the side of the resize handle square, in screen pixels.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Grid ────────────────────────────────────────────────────────

/// Background dot grid spacing in canvas units.
pub const GRID_TILE: f64 = 24.0;
