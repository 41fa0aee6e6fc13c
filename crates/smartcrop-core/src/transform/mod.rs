//! Applying crops to pixel data.
//!
//! # Coordinate System
//!
//! - Pixel rectangles use half-open `[min, max)` ranges
//! - Normalized crops are fractions (0.0 to 1.0) of the image dimensions
//! - Origin is top-left corner

mod crop;

pub use crop::{apply_crop, apply_crop_rect};
