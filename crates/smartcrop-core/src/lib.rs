//! Smartcrop Core - content-aware image cropping
//!
//! This crate finds the crop rectangle of a requested aspect ratio that best
//! preserves an image's interesting content (edges, skin tones and saturated
//! color), and provides the decoding, resampling and cropping needed to use
//! it on encoded image bytes.

pub mod analysis;
pub mod decode;
pub mod luminance;
pub mod transform;

pub use analysis::{
    find_best_crop, find_best_crop_with_config, find_best_crop_with_hook, find_crops,
    find_standard_crops, AnalysisHook, AspectRatio, CropConfig, CropError, CropRect, FeatureMap,
    NoopHook, Resampler, STANDARD_RATIOS,
};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use transform::{apply_crop, apply_crop_rect};
