//! Whole-image compression.
//!
//! The compressor crops an image to a multiple of the block size, runs every
//! 8x8 block of every channel through `decode(encode(block))`, and converts the
//! result back to 8-bit samples.
//!
//! # Shape handling
//!
//! - Images are `(height, width)` or `(height, width, channels)`
//! - Rows and columns beyond the last full block are dropped, not padded
//! - A 2-D input produces a 2-D output; a 3-D input keeps its channel axis,
//!   even when it has a single channel

use log::{debug, warn};
use ndarray::{s, Array2, Array3, ArrayD, ArrayView2, ArrayView3, ArrayViewD, Axis, Ix2, Ix3};

use crate::codec::BLOCK_SIZE;
use crate::config::CompressionConfig;
use crate::error::CodecError;
use crate::pipeline::BlockPipeline;

/// Drives a [`BlockPipeline`] over every block of an image.
#[derive(Debug)]
pub struct ImageCompressor {
    pipeline: BlockPipeline,
}

impl ImageCompressor {
    /// Build the pipeline described by `config`.
    ///
    /// The quantization table and DCT basis are computed here, once, and
    /// reused for every image this compressor handles.
    pub fn new(config: &CompressionConfig) -> Result<Self, CodecError> {
        let pipeline = BlockPipeline::new(&config.stages, &config.stage_params())?;
        debug!(
            "Built compressor: stages={:?}, multiplier={}",
            pipeline.stage_names(),
            config.multiplier
        );
        Ok(Self { pipeline })
    }

    /// Use an existing pipeline, e.g. one with custom stages.
    pub fn with_pipeline(pipeline: BlockPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &BlockPipeline {
        &self.pipeline
    }

    /// Compress a `(height, width, channels)` image.
    ///
    /// The output shape is `(8 * floor(height / 8), 8 * floor(width / 8), channels)`.
    pub fn compress_channels(&self, image: ArrayView3<'_, u8>) -> Result<Array3<u8>, CodecError> {
        let (height, width, channels) = image.dim();
        let cropped = crop_to_block_multiple(image);
        let (out_height, out_width, _) = cropped.dim();

        if (out_height, out_width) != (height, width) {
            warn!(
                "Cropping {}x{} image to {}x{} (dimensions must be multiples of {})",
                width, height, out_width, out_height, BLOCK_SIZE
            );
        }

        let mut samples = cropped.mapv(f64::from);

        for row in (0..out_height).step_by(BLOCK_SIZE) {
            for col in (0..out_width).step_by(BLOCK_SIZE) {
                for channel in 0..channels {
                    let mut block =
                        samples.slice_mut(s![row..row + BLOCK_SIZE, col..col + BLOCK_SIZE, channel]);
                    let restored = self.pipeline.round_trip(block.view())?;
                    block.assign(&restored);
                }
            }
        }

        debug!(
            "Compressed {}x{}x{} image as {} blocks",
            out_width,
            out_height,
            channels,
            (out_height / BLOCK_SIZE) * (out_width / BLOCK_SIZE) * channels
        );

        Ok(samples.mapv(to_sample))
    }

    /// Compress a `(height, width)` grayscale image.
    pub fn compress_gray(&self, image: ArrayView2<'_, u8>) -> Result<Array2<u8>, CodecError> {
        let compressed = self.compress_channels(promote_to_channels(image))?;
        Ok(squeeze_channels(compressed))
    }

    /// Compress an image of either rank.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRank`] unless the array is 2-D or 3-D.
    pub fn compress_dyn(&self, image: ArrayViewD<'_, u8>) -> Result<ArrayD<u8>, CodecError> {
        match image.ndim() {
            2 => {
                let gray = image
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| CodecError::InvalidRank(2))?;
                Ok(self.compress_gray(gray)?.into_dyn())
            }
            3 => {
                let color = image
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| CodecError::InvalidRank(3))?;
                Ok(self.compress_channels(color)?.into_dyn())
            }
            rank => Err(CodecError::InvalidRank(rank)),
        }
    }
}

/// View a `(height, width)` image as `(height, width, 1)`.
pub fn promote_to_channels<A>(image: ArrayView2<'_, A>) -> ArrayView3<'_, A> {
    image.insert_axis(Axis(2))
}

/// Drop the channel axis of a single-channel image.
///
/// # Panics
///
/// Panics if the image does not have exactly one channel.
pub fn squeeze_channels<A>(image: Array3<A>) -> Array2<A> {
    assert_eq!(image.len_of(Axis(2)), 1, "expected a single-channel image");
    image.index_axis_move(Axis(2), 0)
}

/// Largest multiple of the block size not exceeding `len`.
#[inline]
pub fn block_multiple(len: usize) -> usize {
    len / BLOCK_SIZE * BLOCK_SIZE
}

/// Crop height and width down to whole blocks; channels are untouched.
pub fn crop_to_block_multiple<A>(image: ArrayView3<'_, A>) -> ArrayView3<'_, A> {
    let (height, width, _) = image.dim();
    image.slice_move(s![..block_multiple(height), ..block_multiple(width), ..])
}

/// Clamp to the 8-bit range, then truncate toward zero.
#[inline]
fn to_sample(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
