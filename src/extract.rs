//! Copy detected or sliced regions out of a sheet.

use image::imageops;

use crate::geometry::Rectangle;
use crate::raster::RasterImage;

/// Copy `rect` out of `image`, clipped to the image bounds.
pub fn crop(image: &RasterImage, rect: &Rectangle) -> RasterImage {
    let x = rect.x.min(image.width());
    let y = rect.y.min(image.height());
    let width = rect.width.min(image.width() - x);
    let height = rect.height.min(image.height() - y);
    RasterImage::from(imageops::crop_imm(image.as_rgba_image(), x, y, width, height).to_image())
}

/// Crop every rectangle, in order.
pub fn crop_all<'a>(
    image: &RasterImage,
    rects: impl IntoIterator<Item = &'a Rectangle>,
) -> Vec<RasterImage> {
    rects.into_iter().map(|rect| crop(image, rect)).collect()
}

/// True if no pixel of `image` has alpha above `threshold`
pub fn is_blank(image: &RasterImage, threshold: u8) -> bool {
    image.as_raw().chunks_exact(4).all(|px| px[3] <= threshold)
}
