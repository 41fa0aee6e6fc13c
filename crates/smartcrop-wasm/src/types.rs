//! WASM-compatible wrapper types for image data and crop results.
//!
//! This module provides JavaScript-friendly types that wrap the core smartcrop
//! types, handling the conversion between Rust and JavaScript data representations.

use smartcrop_core::{CropRect, DecodedImage};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep images in WASM memory between
/// analysis calls and only extract pixels when needed.
#[wasm_bindgen]
pub struct JsDecodedImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    ///
    /// RGBA data from a canvas must be converted with `from_rgba` instead.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        // Not validated here; the analysis rejects inconsistent buffers.
        JsDecodedImage {
            inner: DecodedImage {
                width,
                height,
                pixels,
            },
        }
    }

    /// Build an image from RGBA data, e.g. `ImageData.data` of a canvas.
    /// The alpha channel is dropped.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> JsDecodedImage {
        let pixels = rgba
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        JsDecodedImage::new(width, height, pixels)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    /// Borrow the core image for analysis without copying the pixels.
    pub(crate) fn as_decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// A crop rectangle for JavaScript, in source pixel coordinates.
///
/// `max_x` and `max_y` are exclusive, so `width = max_x - min_x`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> JsCropRect {
        JsCropRect {
            inner: CropRect::new(min_x, min_y, max_x, max_y),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn min_x(&self) -> u32 {
        self.inner.min_x
    }

    #[wasm_bindgen(getter)]
    pub fn min_y(&self) -> u32 {
        self.inner.min_y
    }

    #[wasm_bindgen(getter)]
    pub fn max_x(&self) -> u32 {
        self.inner.max_x
    }

    #[wasm_bindgen(getter)]
    pub fn max_y(&self) -> u32 {
        self.inner.max_y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }
}

impl JsCropRect {
    pub(crate) fn inner(&self) -> &CropRect {
        &self.inner
    }
}

impl From<CropRect> for JsCropRect {
    fn from(inner: CropRect) -> Self {
        Self { inner }
    }
}
