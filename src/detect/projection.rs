//! Axis projection of alpha occupancy.

use crate::raster::RasterImage;

/// Per-axis "has content" flags for a raster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisProjection {
    /// `columns[x]` is true if any pixel in column `x` is content
    pub columns: Vec<bool>,
    /// `rows[y]` is true if any pixel in row `y` is content
    pub rows: Vec<bool>,
}

impl AxisProjection {
    /// True if no pixel passed the threshold
    pub fn is_blank(&self) -> bool {
        !self.rows.iter().any(|&r| r)
    }
}

/// Project alpha occupancy onto both axes in a single scan.
///
/// A pixel is content when its alpha is strictly greater than `threshold`.
pub fn project_axes(image: &RasterImage, threshold: u8) -> AxisProjection {
    let mut columns = vec![false; image.width() as usize];
    let mut rows = vec![false; image.height() as usize];

    for y in 0..image.height() {
        for (x, alpha) in image.alpha_row(y).enumerate() {
            if alpha > threshold {
                columns[x] = true;
                rows[y as usize] = true;
            }
        }
    }

    AxisProjection { columns, rows }
}
