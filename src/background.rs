//! Solid background removal
//!
//! Finds the dominant color along the image border and clears every pixel
//! close to it. One pass, no feathering.

use std::collections::HashMap;

use image::Rgba;

use crate::raster::RasterImage;

/// Default per-channel tolerance
pub const DEFAULT_TOLERANCE: u32 = 30;

/// Quantization step per channel
const BUCKET_STEP: u16 = 10;

/// A quantized border color and how often it was seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundColorSample {
    /// Channels rounded to the nearest multiple of 10 (may reach 260)
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub count: u32,
}

impl BackgroundColorSample {
    /// Manhattan RGB distance from `rgb` to this bucket's color
    pub fn distance(&self, rgb: [u8; 3]) -> u32 {
        (rgb[0] as i32 - self.r as i32).unsigned_abs()
            + (rgb[1] as i32 - self.g as i32).unsigned_abs()
            + (rgb[2] as i32 - self.b as i32).unsigned_abs()
    }

    /// Hex form of the bucket color, channels saturated to 255
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.r.min(255),
            self.g.min(255),
            self.b.min(255)
        )
    }
}

fn quantize(channel: u8) -> u16 {
    (channel as u16 + BUCKET_STEP / 2) / BUCKET_STEP * BUCKET_STEP
}

/// Border pixels in sampling order: top row, bottom row (left to right),
/// then left column, right column (top to bottom).
fn border_pixels(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let horizontal = (0..width).map(|x| (x, 0)).chain((0..width).map(move |x| (x, height - 1)));
    let vertical = (0..height).map(|y| (0, y)).chain((0..height).map(move |y| (width - 1, y)));
    horizontal.chain(vertical)
}

/// Most frequent quantized color along the border.
///
/// Ties go to the bucket seen first in sampling order. `None` for a
/// zero-sized image.
pub fn dominant_edge_color(image: &RasterImage) -> Option<BackgroundColorSample> {
    if image.is_empty() {
        return None;
    }

    let mut buckets: Vec<BackgroundColorSample> = Vec::new();
    let mut index: HashMap<[u16; 3], usize> = HashMap::new();

    for (x, y) in border_pixels(image.width(), image.height()) {
        let [r, g, b] = image.rgb_at(x, y);
        let key = [quantize(r), quantize(g), quantize(b)];
        match index.get(&key) {
            Some(&i) => buckets[i].count += 1,
            None => {
                index.insert(key, buckets.len());
                buckets.push(BackgroundColorSample { r: key[0], g: key[1], b: key[2], count: 1 });
            }
        }
    }

    // Strictly-greater keeps the earliest bucket on ties
    let mut best: Option<BackgroundColorSample> = None;
    for bucket in buckets {
        if best.map_or(true, |b| bucket.count > b.count) {
            best = Some(bucket);
        }
    }
    best
}

/// Return a copy of `image` with background-colored pixels made transparent.
///
/// A pixel is background when its Manhattan RGB distance to the dominant
/// border color is below `tolerance * 3`. Other pixels are copied unchanged.
pub fn remove_solid_background(image: &RasterImage, tolerance: u32) -> RasterImage {
    matte_background(image, tolerance).0
}

/// Like [`remove_solid_background`], also returning the border color that
/// was cleared. The color is `None` only for a zero-sized image.
pub fn matte_background(
    image: &RasterImage,
    tolerance: u32,
) -> (RasterImage, Option<BackgroundColorSample>) {
    let Some(background) = dominant_edge_color(image) else {
        return (image.clone(), None);
    };
    let limit = tolerance.saturating_mul(3);
    log::debug!(
        "matte: background {} ({} border samples), limit {}",
        background.to_hex(),
        background.count,
        limit
    );

    let mut pixels = image.as_rgba_image().clone();
    let mut cleared = 0u64;
    for Rgba(px) in pixels.pixels_mut() {
        if background.distance([px[0], px[1], px[2]]) < limit {
            px[3] = 0;
            cleared += 1;
        }
    }
    log::debug!("matte: cleared {} pixels", cleared);

    (RasterImage::from(pixels), Some(background))
}
