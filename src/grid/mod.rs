//! Grid settings, grid inference and grid slicing
//!
//! [`GridSettings`] describe a uniform sprite-sheet layout. They are either
//! authored by the user or suggested by [`infer_grid`] from detected sprites;
//! a suggestion is never applied on its own.

mod inference;
mod slicer;

use serde::{Deserialize, Serialize};

use crate::error::SliceError;

pub use inference::{infer_grid, merge_positions, DEFAULT_TOLERANCE};
pub use slicer::{slice_grid, GridCell, GridCells, GridSlicer};

/// Uniform grid layout over a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub offset_x: u32,
    #[serde(default)]
    pub offset_y: u32,
    #[serde(default)]
    pub spacing_x: u32,
    #[serde(default)]
    pub spacing_y: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 1,
            cell_width: 32,
            cell_height: 32,
            offset_x: 0,
            offset_y: 0,
            spacing_x: 0,
            spacing_y: 0,
        }
    }
}

impl GridSettings {
    /// Settings that split a `width` x `height` image into equal cells.
    ///
    /// Cell size uses floor division, so trailing remainder pixels fall
    /// outside the grid.
    ///
    /// ```
    /// use spriteslice::grid::GridSettings;
    ///
    /// let grid = GridSettings::uniform(100, 50, 4, 2);
    /// assert_eq!((grid.cell_width, grid.cell_height), (25, 25));
    /// ```
    pub fn uniform(width: u32, height: u32, columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cell_width: width.checked_div(columns).unwrap_or(0),
            cell_height: height.checked_div(rows).unwrap_or(0),
            ..Self::default()
        }
    }

    /// Total number of cells before clamping or omission
    pub fn cell_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Horizontal distance between the left edges of adjacent cells
    pub fn stride_x(&self) -> u64 {
        self.cell_width as u64 + self.spacing_x as u64
    }

    /// Vertical distance between the top edges of adjacent cells
    pub fn stride_y(&self) -> u64 {
        self.cell_height as u64 + self.spacing_y as u64
    }

    /// Check that the settings can produce at least one cell.
    ///
    /// Fitting inside the image is not checked; the slicer clamps instead.
    pub fn validate(&self) -> Result<(), SliceError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SliceError::InvalidGrid(format!(
                "columns and rows must be at least 1 (got {}x{})",
                self.columns, self.rows
            )));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(SliceError::InvalidGrid(format!(
                "cell size must be positive (got {}x{})",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }
}
