//! Level shift between unsigned and zero-centered samples.

use ndarray::ArrayView2;

use super::{Block, CodecStage};
use crate::error::CodecError;

/// Offset subtracted on encode and added back on decode.
pub const LEVEL_SHIFT: f64 = 128.0;

/// Elementwise `x - 128` / `y + 128`.
///
/// Accepts blocks of any shape since it never mixes samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shift;

impl CodecStage for Shift {
    fn name(&self) -> &'static str {
        "shift"
    }

    fn encode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        Ok(block.mapv(|x| x - LEVEL_SHIFT))
    }

    fn decode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        Ok(block.mapv(|y| y + LEVEL_SHIFT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shift_encode() {
        let block = array![[0.0, 128.0], [255.0, 64.5]];
        let encoded = Shift.encode(block.view()).unwrap();
        assert_eq!(encoded, array![[-128.0, 0.0], [127.0, -63.5]]);
    }

    #[test]
    fn test_shift_decode() {
        let block = array![[-128.0, 0.0], [127.0, -63.5]];
        let decoded = Shift.decode(block.view()).unwrap();
        assert_eq!(decoded, array![[0.0, 128.0], [255.0, 64.5]]);
    }
}
