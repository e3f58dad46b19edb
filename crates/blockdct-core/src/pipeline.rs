//! Ordered composition of codec stages.
//!
//! Encoding runs the stages front to back; decoding runs the same stages back
//! to front. This keeps the chain reversible for any order or stage count.

use ndarray::ArrayView2;

use crate::codec::{Block, CodecStage, StageKind, StageParams};
use crate::error::CodecError;

/// An ordered list of stages applied as one codec.
///
/// An empty pipeline is the identity transform.
#[derive(Debug)]
pub struct BlockPipeline {
    stages: Vec<Box<dyn CodecStage>>,
}

impl BlockPipeline {
    /// Build the built-in stages in the given order.
    ///
    /// `params` is forwarded to every stage constructor.
    pub fn new(kinds: &[StageKind], params: &StageParams) -> Result<Self, CodecError> {
        let stages = kinds
            .iter()
            .map(|kind| kind.build(params))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_stages(stages))
    }

    /// Wrap already-constructed stages, including user-defined ones.
    pub fn from_stages(stages: Vec<Box<dyn CodecStage>>) -> Self {
        Self { stages }
    }

    /// Number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in encode order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Apply every stage's encode in list order.
    pub fn encode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        let mut current = block.to_owned();
        for stage in &self.stages {
            current = stage.encode(current.view())?;
        }
        Ok(current)
    }

    /// Apply every stage's decode in reverse list order.
    pub fn decode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        let mut current = block.to_owned();
        for stage in self.stages.iter().rev() {
            current = stage.decode(current.view())?;
        }
        Ok(current)
    }

    /// `decode(encode(block))`: the lossy approximation of a block.
    pub fn round_trip(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
        let encoded = self.encode(block)?;
        self.decode(encoded.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Dct, Shift, BLOCK_SIZE};
    use crate::tables;
    use ndarray::Array2;
    use std::sync::{Arc, Mutex};

    fn sample_block() -> Array2<f64> {
        Array2::from_shape_fn((8, 8), |(r, c)| ((r * 31 + c * 17) % 256) as f64)
    }

    fn assert_close(a: &Array2<f64>, b: &Array2<f64>, tolerance: f64) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() <= tolerance, "{} vs {}", x, y);
        }
    }

    /// Records the order in which encode and decode are called.
    #[derive(Debug)]
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl CodecStage for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn encode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
            self.log.lock().unwrap().push(format!("encode:{}", self.label));
            Ok(block.to_owned())
        }

        fn decode(&self, block: ArrayView2<'_, f64>) -> Result<Block, CodecError> {
            self.log.lock().unwrap().push(format!("decode:{}", self.label));
            Ok(block.to_owned())
        }
    }

    #[test]
    fn test_default_stage_order() {
        let pipeline =
            BlockPipeline::new(&StageKind::DEFAULT_ORDER, &StageParams::default()).unwrap();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.stage_names(), vec!["shift", "dct", "quantization"]);
    }

    #[test]
    fn test_decode_runs_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = BlockPipeline::from_stages(
            ["a", "b", "c"]
                .into_iter()
                .map(|label| {
                    Box::new(Recorder {
                        label,
                        log: Arc::clone(&log),
                    }) as Box<dyn CodecStage>
                })
                .collect(),
        );

        let block = sample_block();
        pipeline.round_trip(block.view()).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["encode:a", "encode:b", "encode:c", "decode:c", "decode:b", "decode:a"]
        );
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = BlockPipeline::from_stages(Vec::new());
        assert!(pipeline.is_empty());
        let block = sample_block();
        assert_eq!(pipeline.encode(block.view()).unwrap(), block);
        assert_eq!(pipeline.decode(block.view()).unwrap(), block);
    }

    #[test]
    fn test_exact_stages_any_order() {
        let block = sample_block();
        let orders: [&[StageKind]; 4] = [
            &[StageKind::Shift, StageKind::Dct],
            &[StageKind::Dct, StageKind::Shift],
            &[StageKind::Dct],
            &[StageKind::Shift, StageKind::Dct, StageKind::Shift],
        ];
        for order in orders {
            let pipeline = BlockPipeline::new(order, &StageParams::default()).unwrap();
            let restored = pipeline.round_trip(block.view()).unwrap();
            assert_close(&restored, &block, 1e-9);
        }
    }

    #[test]
    fn test_encode_feeds_each_stage() {
        let pipeline = BlockPipeline::from_stages(vec![Box::new(Shift), Box::new(Dct::new())]);
        let block = Array2::from_elem((BLOCK_SIZE, BLOCK_SIZE), 200.0);
        let encoded = pipeline.encode(block.view()).unwrap();
        // (200 - 128) * 8 on DC, nothing elsewhere
        assert!((encoded[[0, 0]] - 576.0).abs() < 1e-9);
        assert!(encoded[[3, 4]].abs() < 1e-9);
    }

    #[test]
    fn test_lossy_pipeline_constant_block() {
        let params = StageParams {
            multiplier: 1.0,
            quantization_table: tables::UNIT,
        };
        let pipeline = BlockPipeline::new(&StageKind::DEFAULT_ORDER, &params).unwrap();
        let block = Array2::from_elem((8, 8), 200.0);
        let restored = pipeline.round_trip(block.view()).unwrap();
        assert_close(&restored, &block, 1e-9);
    }

    #[test]
    fn test_errors_propagate() {
        let pipeline =
            BlockPipeline::new(&StageKind::DEFAULT_ORDER, &StageParams::default()).unwrap();
        let block = Array2::<f64>::zeros((4, 4));
        assert!(matches!(
            pipeline.encode(block.view()),
            Err(CodecError::BlockShape { .. })
        ));
    }

    #[test]
    fn test_new_rejects_bad_params() {
        let params = StageParams {
            multiplier: -2.0,
            ..Default::default()
        };
        assert!(BlockPipeline::new(&[StageKind::Shift], &params).is_ok());
        assert!(matches!(
            BlockPipeline::new(&StageKind::DEFAULT_ORDER, &params),
            Err(CodecError::InvalidMultiplier(_))
        ));
    }
}
