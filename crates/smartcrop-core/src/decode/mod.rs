//! Image decoding and resampling collaborators for the crop analysis.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images from raw bytes
//! - Applying EXIF orientation so coordinates match the displayed image
//! - Resampling images for the analysis prescaler
//!
//! The analysis engine itself only ever sees a [`DecodedImage`]; anything
//! that can produce one (a browser canvas, another decoder) works as well.
//!
//! # Examples
//!
//! ```ignore
//! use smartcrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use resize::{downsample_area, resize, scale_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
