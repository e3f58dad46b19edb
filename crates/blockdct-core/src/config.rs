//! Compression settings.

use serde::{Deserialize, Serialize};

use crate::codec::{StageKind, StageParams, BLOCK_SIZE};
use crate::tables;

/// Everything needed to build an [`ImageCompressor`](crate::ImageCompressor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionConfig {
    /// Multiplier `k` applied to the base quantization table (higher = coarser)
    pub multiplier: f64,
    /// Base quantization table, row-major
    pub quantization_table: [[f64; BLOCK_SIZE]; BLOCK_SIZE],
    /// Stage order used for encoding; decoding runs it in reverse
    pub stages: Vec<StageKind>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            quantization_table: tables::LUMINANCE,
            stages: StageKind::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl CompressionConfig {
    /// Default stage order with the given quantization settings.
    pub fn new(multiplier: f64, quantization_table: [[f64; BLOCK_SIZE]; BLOCK_SIZE]) -> Self {
        Self {
            multiplier,
            quantization_table,
            ..Self::default()
        }
    }

    /// The parameters forwarded to every stage constructor.
    pub fn stage_params(&self) -> StageParams {
        StageParams {
            multiplier: self.multiplier,
            quantization_table: self.quantization_table,
        }
    }
}
