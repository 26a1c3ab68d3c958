//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod detect;
mod matte;
mod slice;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, ConfigError, SpriteConfig};
use crate::detect::DetectionStrategy;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Image extensions picked up when an input is a directory
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "gif", "bmp", "webp"];

/// Check if a path has an image extension the loader understands.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Find all image files in a directory (recursively), sorted by path.
///
/// Extensions match case-insensitively, so `SHEET.PNG` is picked up.
pub fn find_image_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*", glob::Pattern::escape(&dir.display().to_string()));
    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file() && is_image_file(p)).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Expand directories into the image files they contain; files pass through.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                find_image_files(input)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}

/// Spriteslice - detect, slice and matte sprite sheets
#[derive(Parser)]
#[command(name = "sprs")]
#[command(about = "Spriteslice - detect sprite boundaries, infer grids and slice sprite sheets")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to sprs.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Detection flags shared by `detect` and `slice`
#[derive(Args, Debug, Clone, Default)]
pub struct DetectionArgs {
    /// Alpha above this value counts as content (0-255, default: 10)
    #[arg(long)]
    pub alpha: Option<u8>,

    /// Detection strategy: projection or components
    #[arg(long)]
    pub strategy: Option<DetectionStrategy>,

    /// Merge distance for grid inference in pixels (default: 5)
    #[arg(long)]
    pub tolerance: Option<u32>,

    /// Drop detected boxes smaller than this many pixels
    #[arg(long)]
    pub min_area: Option<u32>,
}

/// Ids of every [`GridArgs`] flag; `--auto` and `--detected` reject them
const GRID_ARG_IDS: [&str; 8] =
    ["columns", "rows", "cell_width", "cell_height", "offset_x", "offset_y", "spacing_x", "spacing_y"];

/// Explicit grid flags for `slice`
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Number of grid columns
    #[arg(long)]
    pub columns: Option<u32>,

    /// Number of grid rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Cell width (default: image width / columns)
    #[arg(long)]
    pub cell_width: Option<u32>,

    /// Cell height (default: image height / rows)
    #[arg(long)]
    pub cell_height: Option<u32>,

    /// Left edge of the first column
    #[arg(long, default_value = "0")]
    pub offset_x: u32,

    /// Top edge of the first row
    #[arg(long, default_value = "0")]
    pub offset_y: u32,

    /// Gap between columns
    #[arg(long, default_value = "0")]
    pub spacing_x: u32,

    /// Gap between rows
    #[arg(long, default_value = "0")]
    pub spacing_y: u32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect sprite boundaries and suggest a grid
    Detect {
        /// Images or directories of images
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Slice a sheet into individual sprite images
    Slice {
        /// Sprite sheet image
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Slice by the grid inferred from detection
        #[arg(long, conflicts_with_all = GRID_ARG_IDS, conflicts_with = "detected")]
        auto: bool,

        /// Crop each detected sprite box instead of a grid
        #[arg(long, conflicts_with_all = GRID_ARG_IDS)]
        detected: bool,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Output directory (default: from config, "sprites")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name prefix for sprites
        #[arg(long)]
        prefix: Option<String>,

        /// Skip cells without any content
        #[arg(long)]
        skip_empty: bool,

        /// Do not write manifest.json
        #[arg(long)]
        no_manifest: bool,
    },

    /// Make a solid background transparent
    Matte {
        /// Input image
        input: PathBuf,

        /// Output file (default: {input}_matte.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-channel color tolerance (default: 30)
        #[arg(long)]
        tolerance: Option<u32>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

/// Load the configuration and apply command-line overrides.
fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<SpriteConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            let errors = config.validate();
            if errors.is_empty() {
                Ok(config)
            } else {
                for e in errors {
                    eprintln!("Error: {}", e);
                }
                Err(ExitCode::from(EXIT_INVALID_ARGS))
            }
        }
        Err(e @ ConfigError::Validation(_)) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

impl DetectionArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            alpha_threshold: self.alpha,
            strategy: self.strategy,
            inference_tolerance: self.tolerance,
            min_sprite_area: self.min_area,
            ..Default::default()
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Detect { inputs, detection, json } => {
            let config = match resolve_config(config_path, &detection.overrides()) {
                Ok(c) => c,
                Err(code) => return code,
            };
            detect::run_detect(&inputs, &config, json)
        }
        Commands::Slice {
            input,
            grid,
            auto,
            detected,
            detection,
            output,
            prefix,
            skip_empty,
            no_manifest,
        } => {
            let overrides = CliOverrides { out: output, prefix, ..detection.overrides() };
            let mut config = match resolve_config(config_path, &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            if no_manifest {
                config.output.manifest = false;
            }
            let mode = if auto {
                slice::SliceMode::Inferred
            } else if detected {
                slice::SliceMode::Detected
            } else {
                slice::SliceMode::Explicit(grid)
            };
            slice::run_slice(&input, mode, &config, skip_empty)
        }
        Commands::Matte { input, output, tolerance } => {
            let overrides = CliOverrides { background_tolerance: tolerance, ..Default::default() };
            let config = match resolve_config(config_path, &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            matte::run_matte(&input, output.as_deref(), &config)
        }
    }
}
