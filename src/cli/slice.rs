//! Slice command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{GridArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::SpriteConfig;
use crate::detect::detect_sprite_boundaries;
use crate::extract::{crop_all, is_blank};
use crate::geometry::Rectangle;
use crate::grid::{GridSettings, GridSlicer};
use crate::output::{load_image, save_png, sprite_file_name, SliceManifest};
use crate::progress::LogProgress;
use crate::raster::RasterImage;

/// How the regions to cut are chosen
#[derive(Debug, Clone)]
pub enum SliceMode {
    /// User-authored grid
    Explicit(GridArgs),
    /// Grid suggested by detection
    Inferred,
    /// Detected boxes, no grid
    Detected,
}

/// Build grid settings from explicit flags.
///
/// Missing cell sizes divide the image evenly by columns and rows.
pub(crate) fn grid_from_args(args: &GridArgs, width: u32, height: u32) -> Result<GridSettings, String> {
    let (Some(columns), Some(rows)) = (args.columns, args.rows) else {
        return Err("--columns and --rows are required (or use --auto / --detected)".to_string());
    };

    let uniform = GridSettings::uniform(width, height, columns, rows);
    let settings = GridSettings {
        cell_width: args.cell_width.unwrap_or(uniform.cell_width),
        cell_height: args.cell_height.unwrap_or(uniform.cell_height),
        offset_x: args.offset_x,
        offset_y: args.offset_y,
        spacing_x: args.spacing_x,
        spacing_y: args.spacing_y,
        ..uniform
    };
    settings.validate().map_err(|e| e.to_string())?;
    Ok(settings)
}

/// Regions to cut, with their grid position when sliced by grid
type Regions = Vec<(Rectangle, Option<[u32; 2]>)>;

fn grid_regions(image: &RasterImage, settings: GridSettings) -> Regions {
    GridSlicer::new(image.width(), image.height(), settings)
        .cells()
        .map(|cell| (cell.rect, Some([cell.row, cell.column])))
        .collect()
}

/// Execute the slice command
pub fn run_slice(input: &Path, mode: SliceMode, config: &SpriteConfig, skip_empty: bool) -> ExitCode {
    let image = match load_image(input) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = config.detection_options();
    let (grid, regions) = match mode {
        SliceMode::Explicit(args) => match grid_from_args(&args, image.width(), image.height()) {
            Ok(settings) => (Some(settings), grid_regions(&image, settings)),
            Err(message) => {
                eprintln!("Error: {}", message);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        SliceMode::Inferred => {
            let detection = detect_sprite_boundaries(&image, &options, &mut LogProgress);
            match detection.suggested_grid {
                Some(settings) => {
                    println!(
                        "Inferred grid: {} columns x {} rows, cell {}x{}, offset ({}, {})",
                        settings.columns,
                        settings.rows,
                        settings.cell_width,
                        settings.cell_height,
                        settings.offset_x,
                        settings.offset_y
                    );
                    (Some(settings), grid_regions(&image, settings))
                }
                None => {
                    eprintln!("Error: no sprites detected in '{}', cannot infer a grid", input.display());
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
        SliceMode::Detected => {
            let detection = detect_sprite_boundaries(&image, &options, &mut LogProgress);
            let regions = detection.sprites.iter().map(|s| (s.rect, None)).collect();
            (None, regions)
        }
    };

    let out_dir = &config.output.dir;
    let mut manifest = SliceManifest::new(input, &image, grid);
    let mut skipped = 0usize;

    let sprites = crop_all(&image, regions.iter().map(|(rect, _)| rect));
    for ((rect, cell), sprite) in regions.into_iter().zip(sprites) {
        if skip_empty && is_blank(&sprite, options.alpha_threshold) {
            skipped += 1;
            continue;
        }

        let file = sprite_file_name(&config.output.prefix, manifest.sprites.len());
        let path = out_dir.join(&file);
        if let Err(e) = save_png(&sprite, &path) {
            eprintln!("Error: Failed to write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        manifest.push(file, rect, cell);
    }

    if config.output.manifest {
        let manifest_path = out_dir.join("manifest.json");
        if let Err(e) = manifest.write(&manifest_path) {
            eprintln!("Error: Failed to write '{}': {}", manifest_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    println!("Sliced: {} sprites into {}", manifest.sprites.len(), out_dir.display());
    if skipped > 0 {
        println!("  Skipped {} empty cells", skipped);
    }

    ExitCode::from(EXIT_SUCCESS)
}
