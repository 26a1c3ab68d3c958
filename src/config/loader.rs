//! Configuration loading and discovery for `sprs.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpriteConfig;
use crate::detect::DetectionStrategy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "sprs.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprs.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override alpha threshold
    pub alpha_threshold: Option<u8>,
    /// Override detection strategy
    pub strategy: Option<DetectionStrategy>,
    /// Override grid inference tolerance
    pub inference_tolerance: Option<u32>,
    /// Override minimum sprite area
    pub min_sprite_area: Option<u32>,
    /// Override background tolerance
    pub background_tolerance: Option<u32>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override sprite file prefix
    pub prefix: Option<String>,
}

/// Locate `sprs.toml`: the nearest one at or above the working directory,
/// else the per-user file from [`find_xdg_config`].
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(|cwd| find_config_from(&cwd)).or_else(find_xdg_config)
}

/// `$XDG_CONFIG_HOME/spriteslice/sprs.toml`, falling back to
/// `~/.config/spriteslice/sprs.toml`, if that file exists.
pub fn find_xdg_config() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("spriteslice").join(CONFIG_FILE)).filter(|p| p.is_file())
}

/// Nearest `sprs.toml` in `start` or one of its ancestors.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE)).find(|p| p.is_file())
}

/// Load and validate configuration.
///
/// An explicit `path` must exist. Without one the file is discovered with
/// [`find_config`]; when none is found the defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<SpriteConfig, ConfigError> {
    let Some(config_path) = path.map(Path::to_path_buf).or_else(find_config) else {
        return Ok(SpriteConfig::default());
    };
    log::debug!("loading config from {}", config_path.display());

    let config: SpriteConfig = toml::from_str(&fs::read_to_string(&config_path)?)?;
    let errors = config.validate();
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Validation(errors.iter().map(ToString::to_string).collect()))
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut SpriteConfig, overrides: &CliOverrides) {
    if let Some(alpha) = overrides.alpha_threshold {
        config.detection.alpha_threshold = alpha;
    }
    if let Some(strategy) = overrides.strategy {
        config.detection.strategy = strategy;
    }
    if let Some(area) = overrides.min_sprite_area {
        config.detection.min_sprite_area = area;
    }
    if let Some(tolerance) = overrides.inference_tolerance {
        config.inference.tolerance = tolerance;
    }
    if let Some(tolerance) = overrides.background_tolerance {
        config.background.tolerance = tolerance;
    }
    if let Some(ref out) = overrides.out {
        config.output.dir = out.clone();
    }
    if let Some(ref prefix) = overrides.prefix {
        config.output.prefix = prefix.clone();
    }
}
