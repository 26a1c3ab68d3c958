//! Candidate boxes from row runs x column runs, filtered by content.

use rayon::prelude::*;

use crate::geometry::{Rectangle, RunInterval};
use crate::raster::RasterImage;

use super::DetectedSprite;

/// Candidate count above which the content check runs on the rayon pool
const PARALLEL_CANDIDATES: usize = 64;

/// Intersect every row run with every column run and keep the boxes that
/// contain at least one pixel with alpha above `threshold`.
///
/// Output order is row-run major, column-run minor, regardless of whether
/// the content check ran in parallel.
pub fn build_boundary_grid(
    image: &RasterImage,
    row_runs: &[RunInterval],
    column_runs: &[RunInterval],
    threshold: u8,
) -> Vec<DetectedSprite> {
    let candidates: Vec<(usize, usize)> = (0..row_runs.len())
        .flat_map(|r| (0..column_runs.len()).map(move |c| (r, c)))
        .collect();

    let check = |&(r, c): &(usize, usize)| {
        let rect = Rectangle::from_runs(column_runs[c], row_runs[r]);
        has_content(image, &rect, threshold).then(|| DetectedSprite::from_runs(rect, r, c))
    };

    if candidates.len() >= PARALLEL_CANDIDATES {
        candidates.par_iter().filter_map(check).collect()
    } else {
        candidates.iter().filter_map(check).collect()
    }
}

/// True if any pixel inside `rect` has alpha above `threshold`.
pub fn has_content(image: &RasterImage, rect: &Rectangle, threshold: u8) -> bool {
    (rect.y..rect.bottom())
        .any(|y| (rect.x..rect.right()).any(|x| image.alpha_at(x, y) > threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{find_runs, project_axes, Provenance};
    use crate::test_utils::sheet_with_blocks;

    fn detect(image: &RasterImage) -> Vec<DetectedSprite> {
        let projection = project_axes(image, 10);
        let rows = find_runs(&projection.rows);
        let cols = find_runs(&projection.columns);
        build_boundary_grid(image, &rows, &cols, 10)
    }

    #[test]
    fn test_two_by_two_grid() {
        let image = sheet_with_blocks(20, 20, &[(1, 1, 4, 4), (11, 1, 4, 4), (1, 11, 4, 4), (11, 11, 4, 4)]);
        let sprites = detect(&image);
        let rects: Vec<Rectangle> = sprites.iter().map(|s| s.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rectangle::new(1, 1, 4, 4),
                Rectangle::new(11, 1, 4, 4),
                Rectangle::new(1, 11, 4, 4),
                Rectangle::new(11, 11, 4, 4),
            ]
        );
    }

    #[test]
    fn test_diagonal_layout_rejects_empty_intersections() {
        // Two sprites on a diagonal: the off-diagonal candidates are empty
        let image = sheet_with_blocks(20, 20, &[(0, 0, 5, 5), (10, 10, 5, 5)]);
        let sprites = detect(&image);
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].rect, Rectangle::new(0, 0, 5, 5));
        assert_eq!(sprites[1].rect, Rectangle::new(10, 10, 5, 5));
        assert_eq!(sprites[1].provenance, Provenance::Runs { row_run: 1, column_run: 1 });
    }

    #[test]
    fn test_l_shape_layout() {
        let image = sheet_with_blocks(30, 30, &[(0, 0, 5, 5), (10, 0, 5, 5), (0, 10, 5, 5)]);
        let sprites = detect(&image);
        assert_eq!(sprites.len(), 3);
        assert!(!sprites.iter().any(|s| s.rect == Rectangle::new(10, 10, 5, 5)));
    }

    #[test]
    fn test_parallel_path_preserves_order() {
        // 9 x 9 = 81 candidates, above the parallel cutoff
        let blocks: Vec<(u32, u32, u32, u32)> = (0..9)
            .flat_map(|r| (0..9).map(move |c| (c * 4, r * 4, 2, 2)))
            .collect();
        let image = sheet_with_blocks(36, 36, &blocks);
        let sprites = detect(&image);
        assert_eq!(sprites.len(), 81);
        for (i, sprite) in sprites.iter().enumerate() {
            let (r, c) = (i as u32 / 9, i as u32 % 9);
            assert_eq!(sprite.rect, Rectangle::new(c * 4, r * 4, 2, 2));
        }
    }

    #[test]
    fn test_has_content_threshold() {
        let image = sheet_with_blocks(4, 4, &[(2, 2, 1, 1)]);
        assert!(has_content(&image, &Rectangle::new(0, 0, 4, 4), 10));
        assert!(!has_content(&image, &Rectangle::new(0, 0, 2, 2), 10));
        assert!(!has_content(&image, &Rectangle::new(0, 0, 4, 4), 255));
    }
}
