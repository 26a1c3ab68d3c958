//! Raster images and pixel sampling
//!
//! A [`RasterImage`] is an immutable RGBA grid, origin top-left, row-major.
//! The engine never mutates one in place; transforms return a new image.

use image::{Rgba, RgbaImage};

use crate::error::SliceError;

/// Bytes per RGBA pixel
const CHANNELS: usize = 4;

/// Immutable RGBA raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    /// Build a raster from a raw RGBA buffer.
    ///
    /// Fails with [`SliceError::MalformedBuffer`] when `data.len()` is not
    /// `width * height * 4`. Zero-sized rasters are accepted.
    ///
    /// ```
    /// use spriteslice::raster::RasterImage;
    ///
    /// let image = RasterImage::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    /// assert_eq!(image.alpha(0, 0).unwrap(), 255);
    /// assert_eq!(image.alpha(1, 0).unwrap(), 0);
    ///
    /// assert!(RasterImage::from_rgba(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SliceError> {
        let expected = width as usize * height as usize * CHANNELS;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .filter(|_| actual == expected)
            .map(|pixels| Self { pixels })
            .ok_or(SliceError::MalformedBuffer { width, height, expected, actual })
    }

    /// Fully transparent raster of the given size
    pub fn transparent(width: u32, height: u32) -> Self {
        Self { pixels: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])) }
    }

    /// Raster filled with one color
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self { pixels: RgbaImage::from_pixel(width, height, Rgba(color)) }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Alpha (0-255) at `(x, y)`.
    pub fn alpha(&self, x: u32, y: u32) -> Result<u8, SliceError> {
        self.sample(x, y).map(|px| px[3])
    }

    /// RGB at `(x, y)`.
    pub fn rgb(&self, x: u32, y: u32) -> Result<[u8; 3], SliceError> {
        self.sample(x, y).map(|px| [px[0], px[1], px[2]])
    }

    /// Full RGBA sample at `(x, y)`.
    pub fn sample(&self, x: u32, y: u32) -> Result<[u8; 4], SliceError> {
        if x >= self.width() || y >= self.height() {
            return Err(SliceError::IndexOutOfRange {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(self.pixels.get_pixel(x, y).0)
    }

    /// Alpha lookup for scans that already iterate inside the bounds.
    ///
    /// Out-of-range coordinates are a programming error and panic.
    #[inline]
    pub(crate) fn alpha_at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width() && y < self.height());
        let idx = (y as usize * self.width() as usize + x as usize) * CHANNELS;
        self.pixels.as_raw()[idx + 3]
    }

    /// RGB lookup for in-bounds scans; see [`RasterImage::alpha_at`].
    #[inline]
    pub(crate) fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        debug_assert!(x < self.width() && y < self.height());
        let idx = (y as usize * self.width() as usize + x as usize) * CHANNELS;
        let raw = self.pixels.as_raw();
        [raw[idx], raw[idx + 1], raw[idx + 2]]
    }

    /// Alpha channel of one row
    pub(crate) fn alpha_row(&self, y: u32) -> impl Iterator<Item = u8> + '_ {
        let stride = self.width() as usize * CHANNELS;
        let start = y as usize * stride;
        self.pixels.as_raw()[start..start + stride].chunks_exact(CHANNELS).map(|px| px[3])
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        self.pixels
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}
