//! Conversions between `image` crate buffers and sample arrays.
//!
//! Grayscale (`Luma8`) images are compressed as a single 2-D plane; every
//! other color type is converted to 8-bit RGB first. Alpha is discarded.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::compressor::ImageCompressor;
use crate::error::CodecError;

/// Copy a grayscale image into a `(height, width)` array.
pub fn gray_to_array(image: &GrayImage) -> Array2<u8> {
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        image.get_pixel(x as u32, y as u32)[0]
    })
}

/// Copy an RGB image into a `(height, width, 3)` array.
pub fn rgb_to_array(image: &RgbImage) -> Array3<u8> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        image.get_pixel(x as u32, y as u32)[c]
    })
}

/// Build a grayscale image from a `(height, width)` array.
pub fn array_to_gray(samples: ArrayView2<'_, u8>) -> GrayImage {
    let (height, width) = samples.dim();
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        Luma([samples[[y as usize, x as usize]]])
    })
}

/// Build an RGB image from a `(height, width, 3)` array.
///
/// # Panics
///
/// Panics if the array does not have exactly three channels.
pub fn array_to_rgb(samples: ArrayView3<'_, u8>) -> RgbImage {
    assert_eq!(samples.len_of(Axis(2)), 3, "expected an RGB image");
    let (height, width, _) = samples.dim();
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([samples[[y, x, 0]], samples[[y, x, 1]], samples[[y, x, 2]]])
    })
}

/// Compress a decoded image, returning one with the cropped dimensions.
pub fn compress_image(
    compressor: &ImageCompressor,
    image: &DynamicImage,
) -> Result<DynamicImage, CodecError> {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let compressed = compressor.compress_gray(gray_to_array(gray).view())?;
            Ok(DynamicImage::ImageLuma8(array_to_gray(compressed.view())))
        }
        other => {
            let rgb = other.to_rgb8();
            let compressed = compressor.compress_channels(rgb_to_array(&rgb).view())?;
            Ok(DynamicImage::ImageRgb8(array_to_rgb(compressed.view())))
        }
    }
}
