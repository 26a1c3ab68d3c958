//! End-to-end tests for the detection and slicing engine
//!
//! Exercises the public API the way an embedding application would:
//! build a raster, detect, infer, slice and matte.

mod common;

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use spriteslice::background::remove_solid_background;
use spriteslice::detect::{
    detect, detect_sprite_boundaries, find_runs, DetectionOptions, DetectionStrategy,
};
use spriteslice::extract::crop;
use spriteslice::grid::{infer_grid, slice_grid, GridSettings, GridSlicer};
use spriteslice::progress::Milestone;
use spriteslice::{DetectedSprite, RasterImage, Rectangle, RunInterval, SliceError};

use common::{uniform_sheet, SheetBuilder};

fn digest(rects: &[Rectangle]) -> Vec<u8> {
    let bytes = serde_json::to_vec(rects).expect("rectangles serialize");
    Sha256::digest(&bytes).to_vec()
}

// ============================================================================
// Grid slicing
// ============================================================================

#[test]
fn test_slicing_is_idempotent() {
    let settings = GridSettings {
        columns: 7,
        rows: 5,
        cell_width: 13,
        cell_height: 11,
        offset_x: 3,
        offset_y: 2,
        spacing_x: 1,
        spacing_y: 2,
    };
    let first = slice_grid(90, 60, &settings);
    let second = slice_grid(90, 60, &settings);
    assert_eq!(digest(&first), digest(&second));
    assert_eq!(first, second);
}

#[test]
fn test_exact_grid_tiles_image() {
    let (width, height) = (48, 36);
    let settings = GridSettings::uniform(width, height, 4, 3);
    let rects = slice_grid(width, height, &settings);
    assert_eq!(rects.len(), 12);

    let mut covered = HashSet::new();
    for rect in &rects {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                assert!(covered.insert((x, y)), "pixel ({}, {}) covered twice", x, y);
            }
        }
    }
    assert_eq!(covered.len(), (width * height) as usize);
}

#[test]
fn test_overhanging_column_is_clamped() {
    let settings =
        GridSettings { columns: 4, rows: 1, cell_width: 30, cell_height: 20, ..Default::default() };
    let rects = slice_grid(100, 20, &settings);
    let last = rects.last().expect("four cells");
    assert_eq!(last.x, 90);
    assert_eq!(last.width, 100 - last.x);
    assert!(rects.iter().all(|r| r.fits_within(100, 20)));
}

#[test]
fn test_slicer_iterator_matches_vec() {
    let settings = GridSettings::uniform(64, 64, 4, 4);
    let slicer = GridSlicer::new(64, 64, settings);
    let from_iter: Vec<Rectangle> = slicer.cells().map(|c| c.rect).collect();
    assert_eq!(from_iter, slice_grid(64, 64, &settings));
}

// ============================================================================
// Detection
// ============================================================================

#[test]
fn test_single_rectangle_is_detected_exactly() {
    let image = SheetBuilder::new(64, 48).block(17, 9, 21, 14).build();
    let result = detect(&image, &DetectionOptions::default());
    let rects: Vec<Rectangle> = result.sprites.iter().map(|s| s.rect).collect();
    assert_eq!(rects, vec![Rectangle::new(17, 9, 21, 14)]);
}

#[test]
fn test_transparent_image_has_no_sprites() {
    for (w, h) in [(1, 1), (16, 16), (100, 3)] {
        let image = RasterImage::transparent(w, h);
        let result = detect(&image, &DetectionOptions::default());
        assert!(result.sprites.is_empty());
        assert!(result.suggested_grid.is_none());
    }
}

#[test]
fn test_faint_pixels_below_threshold_are_ignored() {
    let image = SheetBuilder::new(20, 20).rect(0, 0, 20, 20, [0, 0, 0, 10]).block(5, 5, 3, 3).build();
    let result = detect(&image, &DetectionOptions::default());
    assert_eq!(result.sprites.len(), 1);
    assert_eq!(result.sprites[0].rect, Rectangle::new(5, 5, 3, 3));
}

#[test]
fn test_uniform_sheet_round_trip() {
    // 4 x 3 cells of 16px with 10px sprites centered (margin 3)
    let image = uniform_sheet(4, 3, 16, 10);
    let result = detect(&image, &DetectionOptions::default());
    assert_eq!(result.sprites.len(), 12);

    let grid = result.suggested_grid.expect("grid inferred");
    assert_eq!((grid.columns, grid.rows), (4, 3));
    assert_eq!((grid.cell_width, grid.cell_height), (10, 10));
    assert_eq!((grid.offset_x, grid.offset_y), (3, 3));
}

#[test]
fn test_components_strategy_handles_staggered_layout() {
    // Second sprite overlaps the first one's rows but not its columns, and
    // the third overlaps both, so projection merges runs the components keep apart
    let image = SheetBuilder::new(40, 40).block(0, 0, 10, 10).block(15, 5, 10, 10).block(5, 25, 10, 10).build();

    let components = detect(
        &image,
        &DetectionOptions { strategy: DetectionStrategy::Components, ..Default::default() },
    );
    let rects: Vec<Rectangle> = components.sprites.iter().map(|s| s.rect).collect();
    assert_eq!(
        rects,
        vec![Rectangle::new(0, 0, 10, 10), Rectangle::new(15, 5, 10, 10), Rectangle::new(5, 25, 10, 10)]
    );

    let projection = detect(&image, &DetectionOptions::default());
    assert!(projection.sprites.iter().all(|s| s.rect.fits_within(40, 40)));
}

#[test]
fn test_progress_fires_each_milestone_once_in_order() {
    let image = uniform_sheet(2, 2, 8, 4);
    let mut seen: Vec<(u8, String)> = Vec::new();
    let mut sink = |percent: u8, message: &str| seen.push((percent, message.to_string()));
    detect_sprite_boundaries(&image, &DetectionOptions::default(), &mut sink);

    let expected: Vec<(u8, String)> =
        Milestone::ALL.iter().map(|m| (m.percent(), m.message().to_string())).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_detected_sprites_crop_to_content() {
    let image = SheetBuilder::new(30, 10).block(2, 2, 4, 4).block(20, 1, 6, 8).build();
    let result = detect(&image, &DetectionOptions::default());
    for sprite in &result.sprites {
        let cropped = crop(&image, &sprite.rect);
        assert_eq!((cropped.width(), cropped.height()), (sprite.rect.width, sprite.rect.height));
    }
}

// ============================================================================
// Runs and inference
// ============================================================================

#[test]
fn test_run_segmentation_boundary() {
    let runs = find_runs(&[false, true, true, false, true]);
    assert_eq!(runs, vec![RunInterval::new(1, 2), RunInterval::new(4, 4)]);
}

#[test]
fn test_grid_inference_two_sprites() {
    let sprites = [
        DetectedSprite::from_runs(Rectangle::new(0, 0, 10, 10), 0, 0),
        DetectedSprite::from_runs(Rectangle::new(20, 0, 10, 10), 0, 1),
    ];
    let grid = infer_grid(&sprites, 5).expect("grid");
    assert_eq!(
        grid,
        GridSettings {
            columns: 2,
            rows: 1,
            cell_width: 10,
            cell_height: 10,
            offset_x: 0,
            offset_y: 0,
            spacing_x: 0,
            spacing_y: 0,
        }
    );
}

// ============================================================================
// Background matte
// ============================================================================

#[test]
fn test_red_border_is_removed() {
    let red = [255, 0, 0, 255];
    let image = SheetBuilder::filled(50, 50, red).rect(5, 5, 40, 40, [20, 90, 200, 255]).build();
    let matted = remove_solid_background(&image, 30);

    for y in 0..50 {
        for x in 0..50 {
            let interior = (5..45).contains(&x) && (5..45).contains(&y);
            let alpha = matted.alpha(x, y).expect("in bounds");
            if interior {
                assert_eq!(alpha, 255, "interior pixel ({}, {})", x, y);
            } else {
                assert_eq!(alpha, 0, "border pixel ({}, {})", x, y);
            }
        }
    }
}

#[test]
fn test_matte_is_deterministic() {
    let image = SheetBuilder::filled(32, 32, [240, 240, 240, 255]).block(8, 8, 16, 16).build();
    let a = remove_solid_background(&image, 30);
    let b = remove_solid_background(&image, 30);
    assert_eq!(Sha256::digest(a.as_raw()), Sha256::digest(b.as_raw()));
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_mismatched_buffer_fails_fast() {
    let err = RasterImage::from_rgba(10, 10, vec![0; 399]).unwrap_err();
    assert!(matches!(err, SliceError::MalformedBuffer { expected: 400, actual: 399, .. }));
}

#[test]
fn test_zero_sized_inputs_yield_empty_results() {
    let image = RasterImage::from_rgba(0, 0, Vec::new()).expect("zero-sized raster is valid");
    assert!(detect(&image, &DetectionOptions::default()).sprites.is_empty());
    assert!(slice_grid(0, 0, &GridSettings::default()).is_empty());
}
