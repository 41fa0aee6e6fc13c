//! WASM bindings for crop analysis.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const rect = find_best_crop(image, 1, 1);
//! const square = apply_crop_rect(image, rect);
//!
//! // Partial overrides; omitted fields keep their defaults.
//! const wide = find_best_crop_with_config(image, 16, 9, { rule_of_thirds: false });
//!
//! // { "1:1": {min_x, ...}, "16:9": {...}, "3:4": {...}, "4:3": {...} }
//! const all = find_standard_crops(image);
//! ```

use crate::types::{JsCropRect, JsDecodedImage};
use serde::Serialize;
use smartcrop_core::{analysis, transform, CropConfig};
use wasm_bindgen::prelude::*;

/// Find the best `width:height` crop of an image with the default heuristics.
///
/// A zero width or height requests a square crop on the shorter side.
///
/// # Errors
///
/// Returns an error if both `width` and `height` are zero, the image is
/// empty, or no candidate fits.
#[wasm_bindgen]
pub fn find_best_crop(image: &JsDecodedImage, width: u32, height: u32) -> Result<JsCropRect, JsValue> {
    analysis::find_best_crop(image.as_decoded(), width, height)
        .map(JsCropRect::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Find the best crop using heuristics overridden by `config`, a plain
/// object with any subset of the `CropConfig` fields.
#[wasm_bindgen]
pub fn find_best_crop_with_config(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    config: JsValue,
) -> Result<JsCropRect, JsValue> {
    let config = config_from_js(config)?;
    analysis::find_best_crop_with_config(image.as_decoded(), width, height, &config)
        .map(JsCropRect::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Best crops for the standard ratios (1:1, 4:3, 3:4, 16:9), returned as a
/// plain object keyed by `"W:H"`.
#[wasm_bindgen]
pub fn find_standard_crops(image: &JsDecodedImage) -> Result<JsValue, JsValue> {
    let crops = analysis::find_standard_crops(image.as_decoded(), &CropConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    crops
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Cut `rect` out of `image`. The rectangle is clamped to the image bounds.
#[wasm_bindgen]
pub fn apply_crop_rect(image: &JsDecodedImage, rect: &JsCropRect) -> JsDecodedImage {
    JsDecodedImage::from_decoded(transform::apply_crop_rect(image.as_decoded(), rect.inner()))
}

fn config_from_js(value: JsValue) -> Result<CropConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))
}


/// These tests use functions that return `Result<T, JsValue>` errors or
/// take a `JsValue`, and only run on wasm32 targets. Use `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct Overrides {
        grid_step: u32,
        rule_of_thirds: bool,
    }

    fn flat(width: u32, height: u32) -> JsDecodedImage {
        JsDecodedImage::new(width, height, vec![10u8; (width * height * 3) as usize])
    }

    #[wasm_bindgen_test]
    fn test_zero_ratio_errors() {
        assert!(find_best_crop(&flat(10, 10), 0, 0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_partial_config() {
        let overrides = serde_wasm_bindgen::to_value(&Overrides {
            grid_step: 4,
            rule_of_thirds: false,
        })
        .unwrap();
        let rect = find_best_crop_with_config(&flat(40, 20), 1, 1, overrides).unwrap();
        assert_eq!(rect.width(), 20);
    }

    #[wasm_bindgen_test]
    fn test_undefined_config_uses_defaults() {
        let rect = find_best_crop_with_config(&flat(40, 20), 1, 1, JsValue::UNDEFINED).unwrap();
        assert_eq!(rect, find_best_crop(&flat(40, 20), 1, 1).unwrap());
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_errors() {
        let bad = serde_wasm_bindgen::to_value(&"not a config").unwrap();
        assert!(find_best_crop_with_config(&flat(10, 10), 1, 1, bad).is_err());
    }

    #[wasm_bindgen_test]
    fn test_standard_crops_object() {
        let value = find_standard_crops(&flat(48, 32)).unwrap();
        assert!(value.is_object());
        let crops: std::collections::BTreeMap<String, smartcrop_core::CropRect> =
            serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(crops.len(), 4);
        assert_eq!(crops["1:1"].width(), 32);
    }
}
