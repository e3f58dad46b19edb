//! Blockdct Core - Block-based lossy transform compression
//!
//! This crate implements the still-image transform-coding chain: level
//! shift, 8x8 Discrete Cosine Transform and scalar quantization. Images are
//! split into 8x8 blocks, each block is encoded and decoded again, and the
//! lossy approximation is written back in place.
//!
//! # Module Structure
//!
//! - `codec` - the [`CodecStage`] trait and the Shift, DCT and Quantization stages
//! - `pipeline` - [`BlockPipeline`], an ordered and reversible chain of stages
//! - `compressor` - [`ImageCompressor`], block partitioning and reassembly
//! - `config` - serializable [`CompressionConfig`]
//! - `layout` - column-major flat-buffer entry point for foreign callers
//! - `interop` - `image` crate conversions
//! - `tables` - standard base quantization tables
//!
//! There is no entropy coding and no bitstream: input and output are arrays
//! of 8-bit samples of (almost) the same shape.

pub mod codec;
pub mod compressor;
pub mod config;
pub mod error;
pub mod interop;
pub mod layout;
pub mod pipeline;
pub mod tables;

pub use codec::{
    CodecStage, Dct, Quantization, QuantizationTable, Shift, StageKind, StageParams, BLOCK_SIZE,
};
pub use compressor::ImageCompressor;
pub use config::CompressionConfig;
pub use error::CodecError;
pub use layout::{compress_flat, CompressedImage};
pub use pipeline::BlockPipeline;
