//! Image file I/O, output naming and slice manifests

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::geometry::Rectangle;
use crate::grid::GridSettings;
use crate::raster::RasterImage;

/// Error type for file input and output
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Manifest serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode an image file into a raster.
pub fn load_image(path: &Path) -> Result<RasterImage, OutputError> {
    let decoded = image::open(path)?;
    Ok(RasterImage::from(decoded.to_rgba8()))
}

/// Save a raster to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RasterImage, path: &Path) -> Result<(), OutputError> {
    create_parent_dirs(path)?;
    image.as_rgba_image().save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// File name for the sprite at `index`: `{prefix}_{index:03}.png`
///
/// ```
/// use spriteslice::output::sprite_file_name;
///
/// assert_eq!(sprite_file_name("hero", 7), "hero_007.png");
/// ```
pub fn sprite_file_name(prefix: &str, index: usize) -> String {
    format!("{}_{:03}.png", prefix, index)
}

/// Default output path for a matted image: `{stem}_matte.png` beside the input
pub fn matte_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    input.with_file_name(format!("{}_matte.png", stem))
}

/// One written sprite in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub file: String,
    #[serde(flatten)]
    pub rect: Rectangle,
    /// Grid position when sliced by grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<[u32; 2]>,
}

/// Record of one slicing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceManifest {
    pub source: String,
    pub size: [u32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSettings>,
    pub sprites: Vec<ManifestEntry>,
}

impl SliceManifest {
    pub fn new(source: &Path, image: &RasterImage, grid: Option<GridSettings>) -> Self {
        Self {
            source: source.display().to_string(),
            size: [image.width(), image.height()],
            grid,
            sprites: Vec::new(),
        }
    }

    pub fn push(&mut self, file: impl Into<String>, rect: Rectangle, cell: Option<[u32; 2]>) {
        self.sprites.push(ManifestEntry { file: file.into(), rect, cell });
    }

    /// Write as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        create_parent_dirs(path)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json + "\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_png_round_trip_preserves_pixels() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("nested").join("sprite.png");
        let image = RasterImage::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();

        save_png(&image, &path).expect("should save png");
        assert!(path.exists());

        let loaded = load_image(&path).expect("should load png");
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("/nonexistent/sheet.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_matte_output_path() {
        assert_eq!(
            matte_output_path(Path::new("art/sheet.png")),
            PathBuf::from("art/sheet_matte.png")
        );
    }

    #[test]
    fn test_manifest_json() {
        let temp = TempDir::new().expect("should create temp dir");
        let image = RasterImage::transparent(20, 10);
        let mut manifest = SliceManifest::new(Path::new("sheet.png"), &image, None);
        manifest.push("sprite_000.png", Rectangle::new(0, 0, 10, 10), Some([0, 0]));
        manifest.push("sprite_001.png", Rectangle::new(10, 0, 10, 10), None);

        let path = temp.path().join("manifest.json");
        manifest.write(&path).expect("should write manifest");

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["size"], serde_json::json!([20, 10]));
        assert_eq!(json["sprites"][1]["x"], 10);
        assert_eq!(json["sprites"][0]["cell"], serde_json::json!([0, 0]));
        assert!(json["sprites"][1].get("cell").is_none());
        assert!(json.get("grid").is_none());
    }
}
