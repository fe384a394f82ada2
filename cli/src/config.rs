//! Canvas settings for `studio replay`: an optional JSON file, then flags.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use canvas::config::CanvasConfig;
use canvas::input::WheelMode;
use clap::{Args, ValueEnum};
use tracing::debug;

use crate::{CliError, read};

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// `CanvasConfig` JSON file; missing fields keep their defaults.
    #[arg(long, env = "STUDIO_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(long, env = "STUDIO_MIN_SCALE")]
    pub min_scale: Option<f64>,
    #[arg(long, env = "STUDIO_MAX_SCALE")]
    pub max_scale: Option<f64>,
    /// Floor for element width and height.
    #[arg(long, env = "STUDIO_MIN_SIZE")]
    pub min_size: Option<f64>,
    #[arg(long, value_enum, env = "STUDIO_WHEEL_MODE")]
    pub wheel_mode: Option<WheelModeArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelModeArg {
    /// Wheel pans; ctrl/cmd + wheel zooms.
    PanOrZoom,
    /// Wheel always zooms.
    Zoom,
}

impl From<WheelModeArg> for WheelMode {
    fn from(arg: WheelModeArg) -> Self {
        match arg {
            WheelModeArg::PanOrZoom => Self::PanOrZoom,
            WheelModeArg::Zoom => Self::Zoom,
        }
    }
}

/// File first, then flags on top.
pub fn resolve(args: &ConfigArgs) -> Result<CanvasConfig, CliError> {
    let base = match &args.config {
        Some(path) => serde_json::from_str(&read(path)?)?,
        None => CanvasConfig::default(),
    };
    let config = apply_overrides(base, args);
    debug!(?config, "canvas config resolved");
    Ok(config)
}

fn apply_overrides(mut config: CanvasConfig, args: &ConfigArgs) -> CanvasConfig {
    if let Some(v) = args.min_scale {
        config.min_scale = v;
    }
    if let Some(v) = args.max_scale {
        config.max_scale = v;
    }
    if let Some(v) = args.min_size {
        config.min_element_size = v;
    }
    if let Some(mode) = args.wheel_mode {
        config.wheel_mode = mode.into();
    }
    config
}
