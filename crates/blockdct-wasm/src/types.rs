//! WASM-compatible wrapper types for compressed images.

use blockdct_core::CompressedImage;
use wasm_bindgen::prelude::*;

/// A compressed image for JavaScript.
///
/// Holds the (possibly cropped) shape and the samples in column-major order,
/// ready to be reshaped on the JavaScript side with the same convention used
/// for the input.
///
/// # Memory Management
///
/// The sample data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`; call it once and keep the result.
#[wasm_bindgen]
pub struct JsCompressedImage {
    shape: Vec<u32>,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// Shape as `[height, width]` or `[height, width, channels]`
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> Vec<u32> {
        self.shape.clone()
    }

    /// Height after cropping to whole blocks
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Width after cropping to whole blocks
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.shape.get(1).copied().unwrap_or(0)
    }

    /// Number of channels (1 for a 2-D image)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u32 {
        self.shape.get(2).copied().unwrap_or(1)
    }

    /// Number of bytes in the sample buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the column-major samples as a Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCompressedImage {
    pub(crate) fn from_compressed(image: CompressedImage) -> Self {
        Self {
            shape: image.shape.iter().map(|&dim| dim as u32).collect(),
            pixels: image.pixels,
        }
    }
}

/// Convert a JavaScript shape to core dimensions.
pub(crate) fn shape_from_u32(shape: &[u32]) -> Vec<usize> {
    shape.iter().map(|&dim| dim as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_compressed_gray() {
        let img = JsCompressedImage::from_compressed(CompressedImage {
            shape: vec![16, 8],
            pixels: vec![0u8; 128],
        });
        assert_eq!(img.shape(), vec![16, 8]);
        assert_eq!(img.height(), 16);
        assert_eq!(img.width(), 8);
        assert_eq!(img.channels(), 1);
        assert_eq!(img.byte_length(), 128);
    }

    #[test]
    fn test_from_compressed_color() {
        let pixels: Vec<u8> = (0..192).map(|i| i as u8).collect();
        let img = JsCompressedImage::from_compressed(CompressedImage {
            shape: vec![8, 8, 3],
            pixels: pixels.clone(),
        });
        assert_eq!(img.channels(), 3);
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_empty_after_crop() {
        let img = JsCompressedImage::from_compressed(CompressedImage {
            shape: vec![0, 8],
            pixels: Vec::new(),
        });
        assert_eq!(img.height(), 0);
        assert_eq!(img.byte_length(), 0);
    }

    #[test]
    fn test_shape_from_u32() {
        assert_eq!(shape_from_u32(&[480, 640, 3]), vec![480, 640, 3]);
        assert!(shape_from_u32(&[]).is_empty());
    }
}
