//! Smartcrop WASM - WebAssembly bindings for smartcrop
//!
//! This crate provides WASM bindings to expose the smartcrop-core analysis
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and crop rectangles
//! - `decode` - Image decoding bindings (JPEG, PNG)
//! - `crop` - Crop analysis and application
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, find_best_crop, apply_crop_rect } from '@smartcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const rect = find_best_crop(image, 1, 1);
//! const thumbnail = apply_crop_rect(image, rect);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod types;

pub use crop::{apply_crop_rect, find_best_crop, find_best_crop_with_config, find_standard_crops};
pub use decode::{decode_image, get_orientation};
pub use types::{JsCropRect, JsDecodedImage};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
