//! Sprite boundary detection
//!
//! The default pipeline projects alpha occupancy onto both axes, splits each
//! axis into runs of content, intersects row runs with column runs, and keeps
//! the intersections that actually contain content. The detected boxes are
//! then fed to grid inference for a suggested [`GridSettings`].
//!
//! ```
//! use spriteslice::detect::{detect, DetectionOptions};
//! use spriteslice::raster::RasterImage;
//!
//! let result = detect(&RasterImage::transparent(16, 16), &DetectionOptions::default());
//! assert!(result.sprites.is_empty());
//! assert!(result.suggested_grid.is_none());
//! ```

mod boundary;
mod components;
mod projection;
mod runs;

use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;
use crate::grid::{infer_grid, GridSettings, DEFAULT_TOLERANCE};
use crate::progress::{Milestone, NoProgress, ProgressSink};
use crate::raster::RasterImage;

pub use boundary::{build_boundary_grid, has_content};
pub use components::{detect_components, UnionFind};
pub use projection::{project_axes, AxisProjection};
pub use runs::find_runs;

/// Default alpha threshold: alpha strictly above this is content
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 10;

/// Where a detected box came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Intersection of the given row run and column run (indices into the
    /// run lists of one detection pass)
    Runs { row_run: usize, column_run: usize },
    /// Bounding box of a connected component with this many content pixels
    Component { pixels: u64 },
}

/// One sprite found by a detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DetectedSprite {
    #[serde(flatten)]
    pub rect: Rectangle,
    pub provenance: Provenance,
}

impl DetectedSprite {
    pub fn from_runs(rect: Rectangle, row_run: usize, column_run: usize) -> Self {
        Self { rect, provenance: Provenance::Runs { row_run, column_run } }
    }

    pub fn from_component(rect: Rectangle, pixels: u64) -> Self {
        Self { rect, provenance: Provenance::Component { pixels } }
    }
}

/// Detection algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStrategy {
    /// Axis projection, run segmentation and boundary grid
    #[default]
    Projection,
    /// 8-connected component labeling
    Components,
}

impl std::str::FromStr for DetectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "projection" => Ok(DetectionStrategy::Projection),
            "components" => Ok(DetectionStrategy::Components),
            other => Err(format!(
                "unknown detection strategy '{}' (expected 'projection' or 'components')",
                other
            )),
        }
    }
}

impl std::fmt::Display for DetectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionStrategy::Projection => write!(f, "projection"),
            DetectionStrategy::Components => write!(f, "components"),
        }
    }
}

/// Options for a detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionOptions {
    /// Alpha strictly above this value counts as content
    pub alpha_threshold: u8,
    pub strategy: DetectionStrategy,
    /// Merge distance for grid inference, in pixels
    pub inference_tolerance: u32,
    /// Boxes with a smaller area are dropped
    pub min_sprite_area: u32,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            strategy: DetectionStrategy::Projection,
            inference_tolerance: DEFAULT_TOLERANCE,
            min_sprite_area: 1,
        }
    }
}

/// Output of a detection pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub sprites: Vec<DetectedSprite>,
    /// Advisory only; callers decide whether to apply it
    pub suggested_grid: Option<GridSettings>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Detect sprites without progress reporting.
pub fn detect(image: &RasterImage, options: &DetectionOptions) -> DetectionResult {
    detect_sprite_boundaries(image, options, &mut NoProgress)
}

/// Detect sprite boxes and suggest a grid.
///
/// Every milestone in [`Milestone::ALL`] is reported once, in order, even
/// when the image is empty or has no content.
pub fn detect_sprite_boundaries(
    image: &RasterImage,
    options: &DetectionOptions,
    progress: &mut dyn ProgressSink,
) -> DetectionResult {
    progress.milestone(Milestone::Loading);

    if image.is_empty() {
        log::debug!("detect: {}x{} image has no pixels", image.width(), image.height());
        for milestone in &Milestone::ALL[1..] {
            progress.milestone(*milestone);
        }
        return DetectionResult::default();
    }

    progress.milestone(Milestone::Analyzing);
    let threshold = options.alpha_threshold;

    let mut sprites = match options.strategy {
        DetectionStrategy::Projection => {
            let projection = project_axes(image, threshold);
            progress.milestone(Milestone::Detecting);
            if projection.is_blank() {
                log::debug!("detect: no pixel above alpha {}", threshold);
                Vec::new()
            } else {
                let row_runs = find_runs(&projection.rows);
                let column_runs = find_runs(&projection.columns);
                log::debug!(
                    "detect: {}x{} image, {} row runs x {} column runs",
                    image.width(),
                    image.height(),
                    row_runs.len(),
                    column_runs.len()
                );
                build_boundary_grid(image, &row_runs, &column_runs, threshold)
            }
        }
        DetectionStrategy::Components => {
            progress.milestone(Milestone::Detecting);
            detect_components(image, threshold)
        }
    };

    let min_area = options.min_sprite_area as u64;
    sprites.retain(|s| s.rect.area() >= min_area);

    progress.milestone(Milestone::Calculating);
    let suggested_grid = infer_grid(&sprites, options.inference_tolerance);
    log::debug!(
        "detect: {} sprites via {}, suggested grid {:?}",
        sprites.len(),
        options.strategy,
        suggested_grid
    );

    progress.milestone(Milestone::Complete);
    DetectionResult { sprites, suggested_grid }
}
