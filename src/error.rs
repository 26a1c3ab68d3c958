//! Error types for the detection and slicing engine
//!
//! Empty images and images without content are not errors: the pipeline
//! returns empty results for them. Only malformed input fails.

use thiserror::Error;

/// Errors raised by the core engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SliceError {
    /// RGBA buffer length does not match the declared dimensions
    #[error("malformed raster: {width}x{height} needs {expected} bytes, got {actual}")]
    MalformedBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// Pixel query outside `[0, width) x [0, height)`
    #[error("pixel ({x}, {y}) is outside the {width}x{height} raster")]
    IndexOutOfRange { x: u32, y: u32, width: u32, height: u32 },
    /// Grid settings that can never produce a cell
    #[error("invalid grid settings: {0}")]
    InvalidGrid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_buffer_message() {
        let err = SliceError::MalformedBuffer { width: 2, height: 2, expected: 16, actual: 12 };
        assert_eq!(err.to_string(), "malformed raster: 2x2 needs 16 bytes, got 12");
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = SliceError::IndexOutOfRange { x: 5, y: 0, width: 4, height: 4 };
        assert!(err.to_string().contains("(5, 0)"));
    }
}
