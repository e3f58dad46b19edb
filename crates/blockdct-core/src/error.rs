//! Error type shared by every codec stage and the image compressor.

use thiserror::Error;

/// Errors that can occur while building or running a compression pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A block reached a stage that only accepts a fixed shape.
    #[error("Invalid block shape: expected {expected:?}, got {actual:?}")]
    BlockShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The quantization multiplier is zero, negative or not finite.
    #[error("Invalid quantization multiplier: {0} (must be finite and positive)")]
    InvalidMultiplier(f64),

    /// An effective quantization step would divide by zero or flip signs.
    #[error("Invalid quantization table entry at ({row}, {col}): {value} (must be finite and positive)")]
    InvalidQuantizationTable { row: usize, col: usize, value: f64 },

    /// A flat quantization table does not hold exactly 64 entries.
    #[error("Invalid quantization table length: expected {expected}, got {actual}")]
    TableLength { expected: usize, actual: usize },

    /// Images must be (height, width) or (height, width, channels).
    #[error("Invalid image rank: expected 2 or 3 dimensions, got {0}")]
    InvalidRank(usize),

    /// A flat pixel buffer does not match the declared shape.
    #[error("Invalid pixel data: expected {expected} samples for the given shape, got {actual}")]
    PixelDataLength { expected: usize, actual: usize },
}
