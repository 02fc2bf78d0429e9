//! Run configuration.
//!
//! An optional `upres.toml` passed with `--config` provides defaults for a
//! batch run. Command-line flags override the file; the file overrides the
//! stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! scale_factor = 2.0        # Multiplier applied to width and height
//!
//! [sharpen]
//! enabled = false           # Unsharp mask after resizing (bitmaps only)
//! intensity = 2.0           # Accepted for compatibility, not used by the mask
//! radius = 2.0              # Blur radius of the mask
//! percent = 150             # Strength of the mask
//! threshold = 3             # Minimum difference (0-255 scale) to sharpen
//!
//! [batch]
//! on_error = "abort"        # "abort" or "continue"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::batch::{BatchParams, ErrorPolicy};
use crate::imaging::{ScaleFactor, Sharpening};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `upres.toml`.
///
/// All fields have defaults; a file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpresConfig {
    pub scale_factor: f64,
    /// Unsharp mask settings.
    pub sharpen: SharpenConfig,
    /// Error handling for directory runs.
    pub batch: BatchConfig,
}

impl Default for UpresConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            sharpen: SharpenConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl UpresConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scale()?;
        if !self.sharpen.radius.is_finite() || self.sharpen.radius <= 0.0 {
            return Err(ConfigError::Validation(
                "sharpen.radius must be greater than 0".into(),
            ));
        }
        if !self.sharpen.intensity.is_finite() {
            return Err(ConfigError::Validation(
                "sharpen.intensity must be a finite number".into(),
            ));
        }
        Ok(())
    }

    pub fn scale(&self) -> Result<ScaleFactor, ConfigError> {
        ScaleFactor::new(self.scale_factor).ok_or_else(|| {
            ConfigError::Validation(format!(
                "scale_factor must be a finite number greater than 0, got {}",
                self.scale_factor
            ))
        })
    }

    /// Batch parameters for a run, before command-line overrides.
    pub fn batch_params(
        &self,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<BatchParams, ConfigError> {
        self.validate()?;
        Ok(BatchParams {
            scale_factor: self.scale()?,
            apply_sharpen: self.sharpen.enabled,
            sharpen_intensity: self.sharpen.intensity,
            sharpening: self.sharpen.to_sharpening(),
            error_policy: self.batch.on_error,
            ..BatchParams::new(input_dir, output_dir)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharpenConfig {
    pub enabled: bool,
    pub intensity: f64,
    pub radius: f32,
    pub percent: u32,
    pub threshold: i32,
}

impl Default for SharpenConfig {
    fn default() -> Self {
        let mask = Sharpening::standard();
        Self {
            enabled: false,
            intensity: 2.0,
            radius: mask.radius,
            percent: mask.percent,
            threshold: mask.threshold,
        }
    }
}

impl SharpenConfig {
    pub fn to_sharpening(&self) -> Sharpening {
        Sharpening {
            radius: self.radius,
            percent: self.percent,
            threshold: self.threshold,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub on_error: ErrorPolicy,
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<UpresConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: UpresConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load the given config file, or fall back to the stock defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<UpresConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(UpresConfig::default()),
    }
}

/// Documented stock config, printed by `upres gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# upres Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Use with: upres --config upres.toml run <INPUT_DIR> <OUTPUT_DIR>
# Command-line flags take precedence over this file.
# Unknown keys will cause an error.

# Multiplier applied to both width and height. Must be greater than 0.
# Values below 1.0 shrink images.
scale_factor = 2.0

# ---------------------------------------------------------------------------
# Sharpening (unsharp mask, applied after resizing; never applied to EXR)
# ---------------------------------------------------------------------------
[sharpen]
enabled = false

# Accepted for compatibility. The mask below is what controls sharpening.
intensity = 2.0

# Blur radius used to build the mask. Must be greater than 0.
radius = 2.0

# Strength in percent: 100 adds the full difference once.
percent = 150

# Differences smaller than this (on a 0-255 scale) are left alone.
threshold = 3

# ---------------------------------------------------------------------------
# Batch behavior
# ---------------------------------------------------------------------------
[batch]
# "abort" stops at the first failing file.
# "continue" skips failing files and reports them at the end.
on_error = "abort"
"##
}
