//! Blockdct WASM - WebAssembly bindings for blockdct
//!
//! This crate is the bridge between a JavaScript caller and blockdct-core. It
//! only validates and reshapes arguments; all compression happens in the core.
//!
//! # Module Structure
//!
//! - `compress` - flat-buffer compression bindings
//! - `types` - WASM-compatible wrapper for compressed images
//! - `logger` - forwards `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress } from '@blockdct/wasm';
//!
//! await init();
//!
//! // Pixels and table are column-major; the table holds 64 entries
//! const result = compress(pixels, new Uint32Array([height, width, 3]), 1.0, qTable);
//! console.log(`Compressed to ${result.shape.join('x')}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod logger;
mod types;

pub use compress::{compress, compress_with_config, default_config};
pub use types::JsCompressedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Warn);
}

/// Set the console log level ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
