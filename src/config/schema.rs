//! Configuration schema types for `sprs.toml`
//!
//! Every section is optional; missing values fall back to the engine defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::detect::{DetectionOptions, DetectionStrategy, DEFAULT_ALPHA_THRESHOLD};
use crate::grid::DEFAULT_TOLERANCE as DEFAULT_INFERENCE_TOLERANCE;

/// Detection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionConfig {
    /// Alpha strictly above this is content
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,
    /// Detection algorithm
    #[serde(default)]
    pub strategy: DetectionStrategy,
    /// Smallest box area kept, in pixels
    #[serde(default = "default_min_sprite_area")]
    pub min_sprite_area: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: default_alpha_threshold(),
            strategy: DetectionStrategy::default(),
            min_sprite_area: default_min_sprite_area(),
        }
    }
}

fn default_alpha_threshold() -> u8 {
    DEFAULT_ALPHA_THRESHOLD
}

fn default_min_sprite_area() -> u32 {
    1
}

/// Grid inference settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Merge distance for row/column start positions
    #[serde(default = "default_inference_tolerance")]
    pub tolerance: u32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self { tolerance: default_inference_tolerance() }
    }
}

fn default_inference_tolerance() -> u32 {
    DEFAULT_INFERENCE_TOLERANCE
}

/// Solid background removal settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackgroundConfig {
    /// Per-channel tolerance; the RGB distance limit is three times this
    #[serde(default = "default_background_tolerance")]
    pub tolerance: u32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self { tolerance: default_background_tolerance() }
    }
}

fn default_background_tolerance() -> u32 {
    crate::background::DEFAULT_TOLERANCE
}

/// Sliced sprite output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory for sliced sprites
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// File name prefix for sliced sprites
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Write manifest.json next to the sprites
    #[serde(default = "default_true")]
    pub manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_out_dir(), prefix: default_prefix(), manifest: true }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("sprites")
}

fn default_prefix() -> String {
    "sprite".to_string()
}

fn default_true() -> bool {
    true
}

/// Complete `sprs.toml` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpriteConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.prefix")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl SpriteConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.detection.min_sprite_area == 0 {
            errors.push(ConfigValidationError {
                field: "detection.min_sprite_area".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.output.prefix.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "output.prefix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.output.prefix.contains(['/', '\\']) {
            errors.push(ConfigValidationError {
                field: "output.prefix".to_string(),
                message: "must not contain path separators".to_string(),
            });
        }

        errors
    }

    /// Detection options described by this configuration
    pub fn detection_options(&self) -> DetectionOptions {
        DetectionOptions {
            alpha_threshold: self.detection.alpha_threshold,
            strategy: self.detection.strategy,
            inference_tolerance: self.inference.tolerance,
            min_sprite_area: self.detection.min_sprite_area,
        }
    }
}
