//! Synthetic sprite sheets shared by the integration tests.

#![allow(dead_code)]

use spriteslice::RasterImage;

/// Opaque color used for sprite content
pub const INK: [u8; 4] = [220, 60, 40, 255];

/// Builds an RGBA buffer and hands it to the engine as a raster.
pub struct SheetBuilder {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SheetBuilder {
    /// Fully transparent sheet
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; (width * height * 4) as usize] }
    }

    /// Sheet filled with one color
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let data = color.iter().copied().cycle().take((width * height * 4) as usize).collect();
        Self { width, height, data }
    }

    /// Fill a rectangle, clipped to the sheet
    pub fn rect(mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) -> Self {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                let idx = ((py * self.width + px) * 4) as usize;
                self.data[idx..idx + 4].copy_from_slice(&color);
            }
        }
        self
    }

    /// Opaque block in the default ink color
    pub fn block(self, x: u32, y: u32, w: u32, h: u32) -> Self {
        self.rect(x, y, w, h, INK)
    }

    pub fn build(self) -> RasterImage {
        RasterImage::from_rgba(self.width, self.height, self.data).expect("buffer matches dimensions")
    }
}

/// `columns x rows` sheet of `cell`-sized cells, each holding a centered
/// `sprite`-sized block
pub fn uniform_sheet(columns: u32, rows: u32, cell: u32, sprite: u32) -> RasterImage {
    let margin = (cell - sprite) / 2;
    let mut builder = SheetBuilder::new(columns * cell, rows * cell);
    for r in 0..rows {
        for c in 0..columns {
            builder = builder.block(c * cell + margin, r * cell + margin, sprite, sprite);
        }
    }
    builder.build()
}
