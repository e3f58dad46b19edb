//! Scalar quantization against a scaled step table.
//!
//! This is the only lossy stage of the chain. All rounding is
//! round-half-to-even so results match array libraries that round that way.

use ndarray::{Array2, ArrayView2, Zip};

use super::{check_shape, Block, CodecStage, BLOCK_SIZE};
use crate::error::CodecError;

/// Effective quantization steps, `round(k * base)`.
///
/// Every entry is finite and strictly positive, so encoding never divides by
/// zero and never flips the sign of a coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationTable {
    steps: Array2<f64>,
}

impl QuantizationTable {
    /// Scale and round a base table.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidMultiplier`] if `multiplier` is not finite and positive
    /// - [`CodecError::InvalidQuantizationTable`] if any rounded entry is not
    ///   finite and positive (e.g. `k = 0.1` against a step of 1 rounds to 0)
    pub fn new(
        multiplier: f64,
        base: &[[f64; BLOCK_SIZE]; BLOCK_SIZE],
    ) -> Result<Self, CodecError> {
        let base = Array2::from_shape_fn((BLOCK_SIZE, BLOCK_SIZE), |(r, c)| base[r][c]);
        Self::from_array(multiplier, base.view())
    }

    /// Same as [`QuantizationTable::new`] for a table held in an array.
    pub fn from_array(multiplier: f64, base: ArrayView2<'_, f64>) -> Result<Self, CodecError> {
        check_shape(&base, (BLOCK_SIZE, BLOCK_SIZE))?;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(CodecError::InvalidMultiplier(multiplier));
        }

        let steps = base.mapv(|q| (multiplier * q).round_ties_even());
        if let Some(((row, col), &value)) = steps
            .indexed_iter()
            .find(|&(_, &q)| !q.is_finite() || q <= 0.0)
        {
            return Err(CodecError::InvalidQuantizationTable { row, col, value });
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> ArrayView2<'_, f64> {
        self.steps.view()
    }
}

/// Quantization stage owning its table.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantization {
    table: QuantizationTable,
}

impl Quantization {
    pub fn new(
        multiplier: f64,
        base: &[[f64; BLOCK_SIZE]; BLOCK_SIZE],
    ) -> Result<Self, CodecError> {
        Ok(Self::with_table(QuantizationTable::new(multiplier, base)?))
    }

    pub fn with_table(table: QuantizationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &QuantizationTable {
        &self.table
    }
}

impl CodecStage for Quantization {
    fn name(&self) -> &'static str {
        "quantization"
    }

    fn encode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        check_shape(&block, self.table.steps.dim())?;
        Ok(Zip::from(&block)
            .and(&self.table.steps)
            .map_collect(|&x, &q| (x / q).round_ties_even()))
    }

    fn decode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        check_shape(&block, self.table.steps.dim())?;
        Ok(Zip::from(&block)
            .and(&self.table.steps)
            .map_collect(|&y, &q| (y * q).round_ties_even()))
    }
}
