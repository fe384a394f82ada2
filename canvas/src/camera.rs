#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (no NaN or infinity from the host).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Viewport transform: canvas space is translated by `(x, y)` after scaling.
///
/// `x` / `y` are in CSS pixels, `scale` is a factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl Transform {
    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale,
            y: (screen.y - self.y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.x,
            y: canvas.y * self.scale + self.y,
        }
    }
}

/// Inclusive zoom range. Always finite, positive and ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f64,
    max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_SCALE, max: DEFAULT_MAX_SCALE }
    }
}

impl ZoomBounds {
    /// Build bounds from two limits, swapping them if given in the wrong
    /// order. A non-finite or non-positive limit falls back to its default.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        let a = if valid(a) { a } else { DEFAULT_MIN_SCALE };
        let b = if valid(b) { b } else { DEFAULT_MAX_SCALE };
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp `scale` into the range. NaN comes back as `min`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Owner of the viewport transform.
///
/// Every mutation goes through a method that clamps the scale, so the stored
/// transform is always within `bounds`. Inputs are sanitized, never rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    transform: Transform,
    bounds: ZoomBounds,
}

impl Camera {
    #[must_use]
    pub fn new(bounds: ZoomBounds) -> Self {
        let transform = Transform { scale: bounds.clamp(1.0), ..Transform::default() };
        Self { transform, bounds }
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Set the pan offset absolutely. Non-finite values are ignored.
    pub fn pan_to(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.transform.x = x;
            self.transform.y = y;
        }
    }

    /// Translate the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_to(self.transform.x + dx, self.transform.y + dy);
    }

    /// Multiply the scale by `factor`, clamped to the zoom bounds.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() {
            self.transform.scale = self.bounds.clamp(self.transform.scale * factor);
        }
    }

    /// Add a signed increment to the scale, clamped to the zoom bounds.
    pub fn zoom_step(&mut self, delta: f64) {
        if delta.is_finite() {
            self.transform.scale = self.bounds.clamp(self.transform.scale + delta);
        }
    }

    /// Replace the whole transform, clamping its scale.
    pub fn set_transform(&mut self, transform: Transform) {
        self.pan_to(transform.x, transform.y);
        if transform.scale.is_finite() {
            self.transform.scale = self.bounds.clamp(transform.scale);
        }
    }

    /// Zoom level as a rounded percentage, as shown in the zoom readout.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale_percent(&self) -> i64 {
        (self.transform.scale * 100.0).round() as i64
    }
}
