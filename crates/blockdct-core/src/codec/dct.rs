//! 2-D Discrete Cosine Transform (type II forward, type III inverse).
//!
//! The textbook definition is a double sum per coefficient:
//!
//! ```text
//! F(u, v) = 1/4 C(u) C(v) sum_x sum_y f(x, y) cos((2x+1)u pi/16) cos((2y+1)v pi/16)
//! ```
//!
//! Because the kernel is separable, it factors into two matrix products with
//! a precomputed cosine basis `E[u][x] = cos((2x+1)u pi/16)`:
//!
//! ```text
//! F = 1/4 * C o (E . f . E^T)
//! f = 1/4 * D . (C o F) . D^T        where D = E^T
//! ```
//!
//! `o` is the elementwise product and `C[u][v] = C(u) C(v)` with
//! `C(0) = 1/sqrt(2)`, `C(k) = 1` otherwise.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use ndarray::{Array2, ArrayView2};

use super::{check_shape, Block, CodecStage, BLOCK_SIZE};
use crate::error::CodecError;

const NORMALIZATION: f64 = 0.25;

/// DCT stage with basis matrices computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dct {
    encode_matrix: Array2<f64>,
    decode_matrix: Array2<f64>,
    scale: Array2<f64>,
}

impl Dct {
    pub fn new() -> Self {
        let n = BLOCK_SIZE;
        let encode_matrix = Array2::from_shape_fn((n, n), |(u, x)| {
            ((2 * x + 1) as f64 * u as f64 * PI / 16.0).cos()
        });
        let decode_matrix = encode_matrix.t().to_owned();
        let scale = Array2::from_shape_fn((n, n), |(u, v)| alpha(u) * alpha(v));

        Self {
            encode_matrix,
            decode_matrix,
            scale,
        }
    }

    /// Cosine basis used by the forward transform, indexed `[u][x]`.
    pub fn encode_matrix(&self) -> ArrayView2<'_, f64> {
        self.encode_matrix.view()
    }

    /// Cosine basis used by the inverse transform, indexed `[x][u]`.
    pub fn decode_matrix(&self) -> ArrayView2<'_, f64> {
        self.decode_matrix.view()
    }

    /// Normalization matrix `C[u][v] = C(u) C(v)`.
    pub fn scale(&self) -> ArrayView2<'_, f64> {
        self.scale.view()
    }
}

impl Default for Dct {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn alpha(k: usize) -> f64 {
    if k == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

impl CodecStage for Dct {
    fn name(&self) -> &'static str {
        "dct"
    }

    fn encode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        check_shape(&block, (BLOCK_SIZE, BLOCK_SIZE))?;
        let basis = self.encode_matrix.dot(&block).dot(&self.encode_matrix.t());
        Ok(&self.scale * &basis * NORMALIZATION)
    }

    fn decode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        check_shape(&block, (BLOCK_SIZE, BLOCK_SIZE))?;
        let weighted = &self.scale * &block;
        let samples = self
            .decode_matrix
            .dot(&weighted)
            .dot(&self.decode_matrix.t());
        Ok(samples * NORMALIZATION)
    }
}
