//! Synthetic rasters for unit tests.

use image::Rgba;

use crate::raster::RasterImage;

/// Fill a rectangle of `image` with `color`, clipped to the raster.
pub(crate) fn paint(image: &mut RasterImage, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) {
    let mut pixels = std::mem::replace(image, RasterImage::transparent(0, 0)).into_rgba_image();
    for py in y..(y + h).min(pixels.height()) {
        for px in x..(x + w).min(pixels.width()) {
            pixels.put_pixel(px, py, Rgba(color));
        }
    }
    *image = RasterImage::from(pixels);
}

/// Transparent raster with opaque blocks at the given rectangles.
pub(crate) fn sheet_with_blocks(width: u32, height: u32, blocks: &[(u32, u32, u32, u32)]) -> RasterImage {
    let mut image = RasterImage::transparent(width, height);
    for &(x, y, w, h) in blocks {
        paint(&mut image, x, y, w, h, [200, 40, 40, 255]);
    }
    image
}
