//! Grid inference from detected sprite boxes.

use crate::detect::DetectedSprite;

use super::GridSettings;

/// Default merge distance for row and column start positions, in pixels
pub const DEFAULT_TOLERANCE: u32 = 5;

/// Merge sorted distinct positions into clusters, scanning left to right.
///
/// A value joins the current cluster when it lies within `tolerance` of the
/// value just before it, so a slowly drifting chain forms one cluster even
/// when its ends are further apart than `tolerance`. Each cluster is
/// represented by its first (smallest) value.
///
/// ```
/// use spriteslice::grid::merge_positions;
///
/// assert_eq!(merge_positions([0, 3, 20, 22], 5), vec![0, 20]);
/// // 0 -> 4 -> 8 chains into one cluster
/// assert_eq!(merge_positions([0, 4, 8], 5), vec![0]);
/// ```
pub fn merge_positions(values: impl IntoIterator<Item = u32>, tolerance: u32) -> Vec<u32> {
    let mut sorted: Vec<u32> = values.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut clusters = Vec::new();
    let mut previous: Option<u32> = None;
    for value in sorted {
        match previous {
            Some(p) if value - p <= tolerance => {}
            _ => clusters.push(value),
        }
        previous = Some(value);
    }
    clusters
}

/// Suggest grid settings that describe the detected sprites.
///
/// Returns `None` for an empty list. Rows and columns count the merged
/// start positions; cell size is the rounded mean sprite size; the offset is
/// the raw minimum sprite position.
pub fn infer_grid(sprites: &[DetectedSprite], tolerance: u32) -> Option<GridSettings> {
    if sprites.is_empty() {
        return None;
    }

    let rows = merge_positions(sprites.iter().map(|s| s.rect.y), tolerance).len() as u32;
    let columns = merge_positions(sprites.iter().map(|s| s.rect.x), tolerance).len() as u32;

    let n = sprites.len() as u64;
    let total_width: u64 = sprites.iter().map(|s| s.rect.width as u64).sum();
    let total_height: u64 = sprites.iter().map(|s| s.rect.height as u64).sum();

    Some(GridSettings {
        columns: columns.max(1),
        rows: rows.max(1),
        cell_width: rounded_mean(total_width, n),
        cell_height: rounded_mean(total_height, n),
        offset_x: sprites.iter().map(|s| s.rect.x).min().unwrap_or(0),
        offset_y: sprites.iter().map(|s| s.rect.y).min().unwrap_or(0),
        spacing_x: 0,
        spacing_y: 0,
    })
}

/// `total / n` rounded to nearest, halves rounding up
fn rounded_mean(total: u64, n: u64) -> u32 {
    ((2 * total + n) / (2 * n)) as u32
}
