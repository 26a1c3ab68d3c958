//! Spriteslice - sprite-sheet boundary detection and grid slicing
//!
//! This library provides functionality to:
//! - Detect sprite bounding boxes from alpha content ([`detect`])
//! - Infer a uniform grid from detected sprites ([`grid::infer_grid`])
//! - Slice a sheet by explicit grid settings ([`grid::GridSlicer`])
//! - Remove a solid background color ([`background`])
//!
//! The engine is pure: every function takes pixel buffers in and returns
//! fresh values, with no state kept between calls. File I/O lives in
//! [`output`] and the `sprs` binary.

pub mod background;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod output;
pub mod progress;
pub mod raster;

#[cfg(test)]
mod test_utils;

pub use detect::{detect_sprite_boundaries, DetectedSprite, DetectionOptions, DetectionResult};
pub use error::SliceError;
pub use geometry::{Rectangle, RunInterval};
pub use grid::GridSettings;
pub use raster::RasterImage;
