//! Detect command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;
use serde::Serialize;

use super::{expand_inputs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::SpriteConfig;
use crate::detect::{detect_sprite_boundaries, DetectionOptions, DetectionResult};
use crate::output::{load_image, OutputError};
use crate::progress::LogProgress;

/// Detection outcome for one input file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectReport {
    file: String,
    width: u32,
    height: u32,
    #[serde(flatten)]
    result: DetectionResult,
}

fn detect_file(path: &Path, options: &DetectionOptions) -> Result<DetectReport, OutputError> {
    let image = load_image(path)?;
    let result = detect_sprite_boundaries(&image, options, &mut LogProgress);
    Ok(DetectReport {
        file: path.display().to_string(),
        width: image.width(),
        height: image.height(),
        result,
    })
}

fn print_report(report: &DetectReport) {
    println!(
        "{}: {} sprite{} ({}x{})",
        report.file,
        report.result.sprites.len(),
        if report.result.sprites.len() == 1 { "" } else { "s" },
        report.width,
        report.height
    );
    for (i, sprite) in report.result.sprites.iter().enumerate() {
        let r = sprite.rect;
        println!("  #{:<3} x={} y={} {}x{}", i, r.x, r.y, r.width, r.height);
    }
    match report.result.suggested_grid {
        Some(grid) => println!(
            "  suggested grid: {} columns x {} rows, cell {}x{}, offset ({}, {})",
            grid.columns, grid.rows, grid.cell_width, grid.cell_height, grid.offset_x, grid.offset_y
        ),
        None => println!("  no content detected"),
    }
}

/// Execute the detect command
pub fn run_detect(inputs: &[PathBuf], config: &SpriteConfig, json: bool) -> ExitCode {
    let files = expand_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: no image files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let options = config.detection_options();
    let outcomes: Vec<(&PathBuf, Result<DetectReport, OutputError>)> =
        files.par_iter().map(|path| (path, detect_file(path, &options))).collect();

    let mut reports = Vec::new();
    let mut failed = false;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error: Failed to read '{}': {}", path.display(), e);
                failed = true;
            }
        }
    }

    if json {
        let rendered = if reports.len() == 1 && files.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        };
        match rendered {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
