//! Flat-buffer boundary for foreign callers.
//!
//! Callers hand over images and quantization tables as flat sequences in
//! **column-major** (Fortran) order: the first axis varies fastest. The same
//! order is used for the returned pixels so the caller can reshape them with
//! the shape it gets back.
//!
//! # Example
//!
//! ```ignore
//! use blockdct_core::layout::compress_flat;
//! use blockdct_core::tables;
//!
//! let pixels = vec![200u8; 16 * 16];
//! let table: Vec<f64> = tables::UNIT.iter().flatten().copied().collect();
//! let out = compress_flat(&pixels, &[16, 16], 1.0, &table).unwrap();
//! assert_eq!(out.shape, vec![16, 16]);
//! ```

use ndarray::{ArrayD, ArrayViewD, IxDyn, ShapeBuilder};
use serde::{Deserialize, Serialize};

use crate::codec::BLOCK_SIZE;
use crate::compressor::ImageCompressor;
use crate::config::CompressionConfig;
use crate::error::CodecError;

/// Compressed samples with the (possibly cropped) shape they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedImage {
    /// `[height, width]` or `[height, width, channels]`
    pub shape: Vec<usize>,
    /// Samples in column-major order
    pub pixels: Vec<u8>,
}

/// Reshape a column-major buffer into an image array.
///
/// # Errors
///
/// - [`CodecError::InvalidRank`] if `shape` is not 2-D or 3-D
/// - [`CodecError::PixelDataLength`] if `pixels` does not fill `shape` exactly
pub fn image_from_column_major(pixels: &[u8], shape: &[usize]) -> Result<ArrayD<u8>, CodecError> {
    if !matches!(shape.len(), 2 | 3) {
        return Err(CodecError::InvalidRank(shape.len()));
    }

    let expected = shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .unwrap_or(usize::MAX);
    if pixels.len() != expected {
        return Err(CodecError::PixelDataLength {
            expected,
            actual: pixels.len(),
        });
    }

    ArrayD::from_shape_vec(IxDyn(shape).f(), pixels.to_vec()).map_err(|_| {
        CodecError::PixelDataLength {
            expected,
            actual: pixels.len(),
        }
    })
}

/// Flatten an image in column-major order.
pub fn image_to_column_major(image: ArrayViewD<'_, u8>) -> Vec<u8> {
    // Reversing the axes makes logical iteration order column-major
    image.t().iter().copied().collect()
}

/// Reshape 64 column-major values into a row-major 8x8 table.
pub fn table_from_column_major(
    values: &[f64],
) -> Result<[[f64; BLOCK_SIZE]; BLOCK_SIZE], CodecError> {
    let expected = BLOCK_SIZE * BLOCK_SIZE;
    if values.len() != expected {
        return Err(CodecError::TableLength {
            expected,
            actual: values.len(),
        });
    }

    let mut table = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for (row, entries) in table.iter_mut().enumerate() {
        for (col, entry) in entries.iter_mut().enumerate() {
            *entry = values[col * BLOCK_SIZE + row];
        }
    }
    Ok(table)
}

/// Compress a flat column-major image with the default stage order.
///
/// `shape` is `[height, width]` or `[height, width, channels]`. The returned
/// shape is cropped to whole 8x8 blocks and may be smaller than `shape`.
pub fn compress_flat(
    pixels: &[u8],
    shape: &[usize],
    multiplier: f64,
    quantization_table: &[f64],
) -> Result<CompressedImage, CodecError> {
    let config = CompressionConfig::new(multiplier, table_from_column_major(quantization_table)?);
    compress_flat_with(&ImageCompressor::new(&config)?, pixels, shape)
}

/// Compress a flat column-major image with an existing compressor.
pub fn compress_flat_with(
    compressor: &ImageCompressor,
    pixels: &[u8],
    shape: &[usize],
) -> Result<CompressedImage, CodecError> {
    let image = image_from_column_major(pixels, shape)?;
    let compressed = compressor.compress_dyn(image.view())?;
    Ok(CompressedImage {
        shape: compressed.shape().to_vec(),
        pixels: image_to_column_major(compressed.view()),
    })
}
