//! Reversible block codec stages.
//!
//! A [`CodecStage`] maps a block to its encoded form and back. Three stages
//! make up the classic transform-coding chain:
//!
//! 1. [`Shift`] - center unsigned samples around zero
//! 2. [`Dct`] - 2-D type II/III cosine transform
//! 3. [`Quantization`] - divide by a step table and round (the lossy step)
//!
//! Stages are immutable after construction and are shared read-only across
//! every block of an image, so the trait requires `Send + Sync`.

mod dct;
mod quantize;
mod shift;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::tables;

pub use dct::Dct;
pub use quantize::{Quantization, QuantizationTable};
pub use shift::Shift;

/// Edge length of a square block.
pub const BLOCK_SIZE: usize = 8;

/// A single-channel block of samples in double precision.
pub type Block = Array2<f64>;

/// A reversible transform over a block.
///
/// `decode(encode(x))` reproduces `x` for exact stages and approximates it for
/// lossy ones. Both directions are required methods, so a stage missing either
/// one does not compile.
pub trait CodecStage: std::fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Forward transform.
    fn encode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError>;

    /// Inverse transform.
    fn decode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError>;
}

/// The closed set of built-in stages, in serializable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Shift,
    Dct,
    Quantization,
}

impl StageKind {
    /// Default chain order: Shift, DCT, Quantization.
    pub const DEFAULT_ORDER: [StageKind; 3] =
        [StageKind::Shift, StageKind::Dct, StageKind::Quantization];

    /// Build the stage, forwarding the shared parameters.
    ///
    /// Stages that take no parameters ignore `params`.
    pub fn build(self, params: &StageParams) -> Result<Box<dyn CodecStage>, CodecError> {
        Ok(match self {
            StageKind::Shift => Box::new(Shift),
            StageKind::Dct => Box::new(Dct::new()),
            StageKind::Quantization => Box::new(Quantization::new(
                params.multiplier,
                &params.quantization_table,
            )?),
        })
    }
}

/// Configuration shared by every stage constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    /// Multiplier `k` applied to the base quantization table.
    pub multiplier: f64,
    /// Base quantization table, row-major.
    pub quantization_table: [[f64; BLOCK_SIZE]; BLOCK_SIZE],
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            quantization_table: tables::LUMINANCE,
        }
    }
}

/// Fail with [`CodecError::BlockShape`] unless `block` is `expected`.
pub(crate) fn check_shape(
    block: &ArrayView2<'_, f64>,
    expected: (usize, usize),
) -> Result<(), CodecError> {
    let actual = block.dim();
    if actual != expected {
        return Err(CodecError::BlockShape { expected, actual });
    }
    Ok(())
}
