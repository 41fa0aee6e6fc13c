//! Per-pixel feature extraction.
//!
//! Builds a [`FeatureMap`] with three independent channels per pixel:
//!
//! - **skin**: how close the pixel's chromaticity is to a reference skin tone
//! - **detail**: discrete Laplacian of luma against the four orthogonal
//!   neighbours, i.e. local edge energy
//! - **saturation**: HSL saturation
//!
//! Skin and saturation are gated on the pixel's own luma and remapped from
//! `(threshold, 1]` onto `(0, 255]`; everything below the threshold is zero.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::instrument;

use super::CropConfig;
use crate::decode::DecodedImage;
use crate::luminance::luma_plane;

/// Immutable per-pixel feature buffer, same size as the working image.
///
/// Channels are stored interleaved as `[skin, detail, saturation]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FeatureMap {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `[skin, detail, saturation]` at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    #[inline]
    pub fn skin(&self, x: u32, y: u32) -> u8 {
        self.get(x, y)[0]
    }

    #[inline]
    pub fn detail(&self, x: u32, y: u32) -> u8 {
        self.get(x, y)[1]
    }

    #[inline]
    pub fn saturation(&self, x: u32, y: u32) -> u8 {
        self.get(x, y)[2]
    }

    /// Raw interleaved channel data.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// The feature buffer as an RGB image (skin in red, detail in green,
    /// saturation in blue), for visual inspection.
    pub fn to_image(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.data.clone())
    }
}

/// Build the feature map of `image`.
#[instrument(level = "debug", skip_all, fields(width = image.width, height = image.height))]
pub fn extract_features(image: &DecodedImage, config: &CropConfig) -> FeatureMap {
    let width = image.width as usize;
    let height = image.height as usize;
    let lumas = luma_plane(&image.pixels);
    let mut data = vec![0u8; width * height * 3];

    if width == 0 || height == 0 {
        return FeatureMap {
            width: image.width,
            height: image.height,
            data,
        };
    }

    let row_len = width * 3;
    let fill_row = |(y, out): (usize, &mut [u8])| {
        extract_row(image, &lumas, config, y, out);
    };

    #[cfg(feature = "rayon")]
    data.par_chunks_mut(row_len).enumerate().for_each(fill_row);

    #[cfg(not(feature = "rayon"))]
    data.chunks_mut(row_len).enumerate().for_each(fill_row);

    FeatureMap {
        width: image.width,
        height: image.height,
        data,
    }
}

fn extract_row(image: &DecodedImage, lumas: &[f64], config: &CropConfig, y: usize, out: &mut [u8]) {
    let w = image.width as usize;
    let h = image.height as usize;
    let row = &image.pixels[y * w * 3..(y + 1) * w * 3];

    for x in 0..w {
        let p = &row[x * 3..x * 3 + 3];
        let (r, g, b) = (p[0], p[1], p[2]);
        let i = y * w + x;

        let detail = if x == 0 || x >= w - 1 || y == 0 || y >= h - 1 {
            0.0
        } else {
            lumas[i] * 4.0 - lumas[i - w] - lumas[i - 1] - lumas[i + 1] - lumas[i + w]
        };

        let lightness = lumas[i] / 255.0;

        let skin = skin_likelihood(r, g, b, &config.skin_color);
        let skin = if skin > config.skin_threshold
            && lightness >= config.skin_brightness_min
            && lightness <= config.skin_brightness_max
        {
            remap(skin, config.skin_threshold)
        } else {
            0.0
        };

        let sat = saturation(r, g, b);
        let sat = if sat > config.saturation_threshold
            && lightness >= config.saturation_brightness_min
            && lightness <= config.saturation_brightness_max
        {
            remap(sat, config.saturation_threshold)
        } else {
            0.0
        };

        out[x * 3] = to_channel(skin);
        out[x * 3 + 1] = to_channel(detail);
        out[x * 3 + 2] = to_channel(sat);
    }
}

/// Map `(threshold, 1]` linearly onto `(0, 255]`.
#[inline]
fn remap(value: f64, threshold: f64) -> f64 {
    (value - threshold) * (255.0 / (1.0 - threshold))
}

/// Clamp to `[0, 255]` and truncate.
#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// `1 - distance` between the pixel's unit RGB vector and `skin_color`.
///
/// Black has no direction and is never skin.
pub fn skin_likelihood(r: u8, g: u8, b: u8, skin_color: &[f64; 3]) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let mag = (r * r + g * g + b * b).sqrt();
    if mag == 0.0 {
        return 0.0;
    }

    let rd = r / mag - skin_color[0];
    let gd = g / mag - skin_color[1];
    let bd = b / mag - skin_color[2];
    1.0 - (rd * rd + gd * gd + bd * bd).sqrt()
}

/// HSL saturation of an RGB pixel, in `[0, 1]`.
pub fn saturation(r: u8, g: u8, b: u8) -> f64 {
    let c_max = r.max(g).max(b);
    let c_min = r.min(g).min(b);
    if c_max == c_min {
        return 0.0;
    }

    let maximum = c_max as f64 / 255.0;
    let minimum = c_min as f64 / 255.0;
    let l = (maximum + minimum) / 2.0;
    let d = maximum - minimum;

    if l > 0.5 {
        d / (2.0 - maximum - minimum)
    } else {
        d / (maximum + minimum)
    }
}
