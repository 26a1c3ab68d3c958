//! Grid slicing: explicit settings to per-cell rectangles.

use serde::Serialize;

use crate::geometry::Rectangle;

use super::GridSettings;

/// One cell of a sliced grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
    pub rect: Rectangle,
}

/// Grid settings bound to the dimensions of the image being sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlicer {
    image_width: u32,
    image_height: u32,
    settings: GridSettings,
}

impl GridSlicer {
    pub fn new(image_width: u32, image_height: u32, settings: GridSettings) -> Self {
        Self { image_width, image_height, settings }
    }

    /// Lazy row-major walk over the cells that overlap the image.
    ///
    /// Every call starts a fresh walk; the slicer holds no iteration state.
    pub fn cells(&self) -> GridCells {
        GridCells { slicer: *self, row: 0, column: 0 }
    }

    /// Rectangle for cell `(row, column)`, clamped to the image.
    ///
    /// `None` if the cell starts outside the image or has zero size.
    pub fn cell_rect(&self, row: u32, column: u32) -> Option<Rectangle> {
        let s = &self.settings;
        let x = (s.offset_x as u64).saturating_add((column as u64).saturating_mul(s.stride_x()));
        let y = self.row_origin(row);
        if x >= self.image_width as u64 || y >= self.image_height as u64 {
            return None;
        }

        let width = (s.cell_width as u64).min(self.image_width as u64 - x);
        let height = (s.cell_height as u64).min(self.image_height as u64 - y);
        if width == 0 || height == 0 {
            return None;
        }

        Some(Rectangle::new(x as u32, y as u32, width as u32, height as u32))
    }

    fn row_origin(&self, row: u32) -> u64 {
        let s = &self.settings;
        (s.offset_y as u64).saturating_add((row as u64).saturating_mul(s.stride_y()))
    }
}

impl IntoIterator for &GridSlicer {
    type Item = GridCell;
    type IntoIter = GridCells;

    fn into_iter(self) -> GridCells {
        self.cells()
    }
}

/// Iterator over the cells of a [`GridSlicer`]
#[derive(Debug, Clone)]
pub struct GridCells {
    slicer: GridSlicer,
    row: u32,
    column: u32,
}

impl Iterator for GridCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let settings = self.slicer.settings;
        if settings.cell_width == 0 || settings.cell_height == 0 {
            return None;
        }

        while self.row < settings.rows {
            if self.column >= settings.columns {
                self.row += 1;
                self.column = 0;
                continue;
            }

            let (row, column) = (self.row, self.column);
            if self.slicer.row_origin(row) >= self.slicer.image_height as u64 {
                // Later rows lie further down
                self.row = settings.rows;
                break;
            }

            match self.slicer.cell_rect(row, column) {
                Some(rect) => {
                    self.column += 1;
                    return Some(GridCell { row, column, rect });
                }
                // Later columns lie further right
                None => self.column = settings.columns,
            }
        }
        None
    }
}

/// Slice `settings` over a `width` x `height` image into row-major rectangles.
///
/// Cells running past the right or bottom edge are clamped; cells starting
/// outside the image are omitted.
///
/// ```
/// use spriteslice::geometry::Rectangle;
/// use spriteslice::grid::{slice_grid, GridSettings};
///
/// let grid = GridSettings { columns: 3, rows: 1, cell_width: 10, cell_height: 10, ..Default::default() };
/// let rects = slice_grid(25, 10, &grid);
/// assert_eq!(rects.last(), Some(&Rectangle::new(20, 0, 5, 10)));
/// ```
pub fn slice_grid(width: u32, height: u32, settings: &GridSettings) -> Vec<Rectangle> {
    GridSlicer::new(width, height, *settings).cells().map(|cell| cell.rect).collect()
}
