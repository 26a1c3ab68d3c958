//! Matte command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::background::matte_background;
use crate::config::SpriteConfig;
use crate::output::{load_image, matte_output_path, save_png};

/// Execute the matte command
pub fn run_matte(input: &Path, output: Option<&Path>, config: &SpriteConfig) -> ExitCode {
    let image = match load_image(input) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let tolerance = config.background.tolerance;
    let (matted, background) = matte_background(&image, tolerance);

    let output_path = output.map(Path::to_path_buf).unwrap_or_else(|| matte_output_path(input));
    if let Err(e) = save_png(&matted, &output_path) {
        eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    match background {
        Some(bg) => println!(
            "Matted: {} (background {}, tolerance {})",
            output_path.display(),
            bg.to_hex(),
            tolerance
        ),
        None => println!("Matted: {} (empty image)", output_path.display()),
    }

    ExitCode::from(EXIT_SUCCESS)
}
