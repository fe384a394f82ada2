//! Canvas behaviour knobs.
//!
//! One `CanvasConfig` covers every variation of the editor: zoom bounds, the
//! resize floor, the toolbar zoom increment, grid spacing, and how the wheel
//! behaves. Missing JSON fields fall back to the defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ZoomBounds;
use crate::consts::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, GRID_TILE, MIN_ELEMENT_SIZE, ZOOM_STEP};
use crate::input::WheelMode;
use crate::render::GridStyle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Floor for element width and height, in canvas units.
    pub min_element_size: f64,
    /// Scale increment for the zoom-in / zoom-out buttons.
    pub zoom_increment: f64,
    /// Background grid spacing, in canvas units.
    pub grid_tile: f64,
    pub wheel_mode: WheelMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            min_element_size: MIN_ELEMENT_SIZE,
            zoom_increment: ZOOM_STEP,
            grid_tile: GRID_TILE,
            wheel_mode: WheelMode::default(),
        }
    }
}

impl CanvasConfig {
    /// Zoom bounds; invalid limits fall back to the defaults.
    #[must_use]
    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds::new(self.min_scale, self.max_scale)
    }

    #[must_use]
    pub fn grid_style(&self) -> GridStyle {
        GridStyle { tile: self.grid_tile }
    }
}
