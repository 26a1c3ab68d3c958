//! Integer pixel geometry shared by detection and slicing

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle
///
/// `width` and `height` are positive for every rectangle the engine emits,
/// and the rectangle lies within the raster it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if the rectangle fits inside a `width` x `height` raster
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0 && self.height > 0 && self.right() <= width && self.bottom() <= height
    }

    /// Rectangle spanned by a column run and a row run
    pub fn from_runs(columns: RunInterval, rows: RunInterval) -> Self {
        Self { x: columns.start, y: rows.start, width: columns.len(), height: rows.len() }
    }
}

/// Inclusive `[start, end]` span along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunInterval {
    pub start: u32,
    pub end: u32,
}

impl RunInterval {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of indices covered (always at least 1)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }
}
