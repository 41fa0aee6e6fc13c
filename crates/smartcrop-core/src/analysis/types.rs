//! Core types for crop analysis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeError;

/// Error types for crop analysis.
#[derive(Debug, Error)]
pub enum CropError {
    /// Both the width and the height ratio were zero.
    #[error("Expect either a height or width")]
    InvalidDimensions,

    /// The image has zero area or a pixel buffer that does not match its size.
    #[error("Image is empty or its pixel buffer does not match {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The scale sweep produced no rectangle that fits the working image.
    #[error("No crop candidates produced")]
    NoCandidates,

    /// The configuration cannot drive a finite sweep.
    #[error("Invalid crop configuration: {0}")]
    InvalidConfig(String),

    /// Decoding or resampling failed upstream of the analysis.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Crop rectangle in pixel coordinates, max edges exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl CropRect {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Whether the pixel `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Swap coordinates so `min <= max` on both axes.
    pub fn canonical(self) -> Self {
        Self {
            min_x: self.min_x.min(self.max_x),
            min_y: self.min_y.min(self.max_y),
            max_x: self.min_x.max(self.max_x),
            max_y: self.min_y.max(self.max_y),
        }
    }

    /// Whether the rectangle lies inside a `width x height` image.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.max_x <= width && self.max_y <= height
    }

    /// Center point as floating-point coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x as f64 + self.max_x as f64) / 2.0,
            (self.min_y as f64 + self.max_y as f64) / 2.0,
        )
    }

    /// Left, top, width and height as fractions of a `width x height` image.
    ///
    /// This is the coordinate system of [`crate::transform::apply_crop`].
    pub fn to_normalized(&self, width: u32, height: u32) -> (f64, f64, f64, f64) {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        (
            self.min_x as f64 / w,
            self.min_y as f64 / h,
            self.width() as f64 / w,
            self.height() as f64 / h,
        )
    }
}

/// Requested crop aspect ratio, e.g. `16:9`.
///
/// A zero component means "unconstrained on that axis"; both zero is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Error returned when parsing an [`AspectRatio`] fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid aspect ratio '{0}', expected W:H")]
pub struct ParseAspectRatioError(pub String);

impl FromStr for AspectRatio {
    type Err = ParseAspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseAspectRatioError(s.to_string());
        let (w, h) = s
            .trim()
            .split_once([':', 'x'])
            .ok_or_else(err)?;
        let width = w.trim().parse().map_err(|_| err())?;
        let height = h.trim().parse().map_err(|_| err())?;
        Ok(Self { width, height })
    }
}

/// Ratios computed by [`crate::analysis::find_standard_crops`].
pub const STANDARD_RATIOS: [AspectRatio; 4] = [
    AspectRatio::new(1, 1),
    AspectRatio::new(4, 3),
    AspectRatio::new(3, 4),
    AspectRatio::new(16, 9),
];
