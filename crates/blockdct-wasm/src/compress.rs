//! Compression WASM bindings.
//!
//! Exposes the flat-buffer entry point of blockdct-core to JavaScript.
//! Pixel buffers and quantization tables are column-major (first axis
//! fastest), and so is the returned pixel buffer.
//!
//! # Functions
//!
//! - [`compress`] - compress with a multiplier and a 64-entry table
//! - [`compress_with_config`] - compress with a full configuration object
//! - [`default_config`] - the default configuration as a JavaScript object
//!
//! # Example
//!
//! ```typescript
//! import { compress_with_config, default_config } from '@blockdct/wasm';
//!
//! const config = default_config();
//! config.multiplier = 2.0;
//! const result = compress_with_config(pixels, new Uint32Array([h, w]), config);
//! ```

use crate::types::{shape_from_u32, JsCompressedImage};
use blockdct_core::layout;
use blockdct_core::{CompressionConfig, ImageCompressor};
use wasm_bindgen::prelude::*;

/// Compress a column-major image.
///
/// # Arguments
///
/// * `pixels` - Samples as a `Uint8Array`, column-major
/// * `shape` - `[height, width]` or `[height, width, channels]`
/// * `k` - Multiplier applied to the quantization table
/// * `q_table` - 64 base quantization steps as a `Float64Array`, column-major
///
/// # Returns
///
/// The compressed image. Its shape is cropped down to multiples of 8 in
/// height and width, so it may be smaller than `shape`.
///
/// # Errors
///
/// Returns an error if:
/// - `shape` is not 2-D or 3-D, or does not match the pixel count
/// - `q_table` does not hold 64 entries
/// - `k` or any scaled table entry is not positive
#[wasm_bindgen]
pub fn compress(
    pixels: &[u8],
    shape: &[u32],
    k: f64,
    q_table: &[f64],
) -> Result<JsCompressedImage, JsValue> {
    layout::compress_flat(pixels, &shape_from_u32(shape), k, q_table)
        .map(JsCompressedImage::from_compressed)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compress a column-major image with a configuration object.
///
/// The object mirrors `CompressionConfig`: `multiplier`, `quantizationTable`
/// (8 rows of 8 numbers, row-major) and `stages` (e.g.
/// `["shift", "dct", "quantization"]`). Missing fields take their defaults.
#[wasm_bindgen]
pub fn compress_with_config(
    pixels: &[u8],
    shape: &[u32],
    config: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let config: CompressionConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
    let compressor =
        ImageCompressor::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    layout::compress_flat_with(&compressor, pixels, &shape_from_u32(shape))
        .map(JsCompressedImage::from_compressed)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The default configuration (`k = 1`, luminance table, default stage order).
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressionConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use blockdct_core::tables;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn unit_table() -> Vec<f64> {
        tables::UNIT.iter().flatten().copied().collect()
    }

    #[wasm_bindgen_test]
    fn test_compress_basic() {
        let pixels = vec![200u8; 16 * 16];
        let result = compress(&pixels, &[16, 16], 1.0, &unit_table()).unwrap();
        assert_eq!(result.shape(), vec![16, 16]);
        assert!(result.pixels().iter().all(|&v| v.abs_diff(200) <= 1));
    }

    #[wasm_bindgen_test]
    fn test_compress_crops() {
        let pixels = vec![50u8; 9 * 9 * 3];
        let result = compress(&pixels, &[9, 9, 3], 1.0, &unit_table()).unwrap();
        assert_eq!(result.shape(), vec![8, 8, 3]);
    }

    #[wasm_bindgen_test]
    fn test_compress_invalid_table_length() {
        let pixels = vec![50u8; 64];
        assert!(compress(&pixels, &[8, 8], 1.0, &[1.0; 10]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_invalid_shape() {
        let pixels = vec![50u8; 64];
        assert!(compress(&pixels, &[64], 1.0, &unit_table()).is_err());
        assert!(compress(&pixels, &[8, 9], 1.0, &unit_table()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_with_default_config() {
        let pixels = vec![128u8; 8 * 8];
        let config = default_config().unwrap();
        let result = compress_with_config(&pixels, &[8, 8], config).unwrap();
        assert_eq!(result.shape(), vec![8, 8]);
    }

    #[wasm_bindgen_test]
    fn test_compress_with_invalid_config() {
        let pixels = vec![128u8; 8 * 8];
        let config = JsValue::from_str("not a config");
        assert!(compress_with_config(&pixels, &[8, 8], config).is_err());
    }
}
