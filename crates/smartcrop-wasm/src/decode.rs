//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, find_best_crop } from '@smartcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const rect = find_best_crop(image, 16, 9);
//! ```

use crate::types::JsDecodedImage;
use smartcrop_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied, so crop coordinates computed on the result
/// match the image as a viewer displays it.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of encoded image bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_of_non_image_is_normal() {
        assert_eq!(get_orientation(&[0, 1, 2, 3]), 1);
    }
}

/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }
}
