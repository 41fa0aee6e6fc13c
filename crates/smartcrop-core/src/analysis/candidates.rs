//! Candidate rectangle enumeration.
//!
//! Candidates are emitted scale-major (largest first), then row by row, then
//! left to right. The selector breaks ties by this order, so it must stay
//! deterministic.

use super::{CropConfig, CropRect};

/// Tolerance when comparing the swept scale against its lower bound, so
/// that `1.0 - 0.1` still counts as reaching a minimum of `0.9`.
const SCALE_EPSILON: f64 = 1e-9;

/// Smallest scale worth sweeping to for an image whose crop was scaled by
/// `crop_scale` from the requested ratio, clamped into the configured range.
pub fn effective_min_scale(crop_scale: f64, config: &CropConfig) -> f64 {
    (1.0 / crop_scale).max(config.min_scale).min(config.max_scale)
}

/// Enumerate crop rectangles of `crop_width x crop_height` (scaled down from
/// `config.max_scale` to `min_scale`) over a `width x height` working image.
///
/// A zero crop dimension falls back to the image's shorter side.
pub fn generate_candidates(
    width: u32,
    height: u32,
    crop_width: f64,
    crop_height: f64,
    min_scale: f64,
    config: &CropConfig,
) -> Vec<CropRect> {
    let min_dimension = width.min(height) as f64;
    let crop_w = if crop_width > 0.0 { crop_width } else { min_dimension };
    let crop_h = if crop_height > 0.0 { crop_height } else { min_dimension };

    let step = config.grid_step.max(1);
    let mut candidates = Vec::new();

    for scale in scales(config.max_scale, min_scale, config.scale_step) {
        let rect_w = (crop_w * scale) as u32;
        let rect_h = (crop_h * scale) as u32;
        if rect_w == 0 || rect_h == 0 {
            continue;
        }

        let mut y = 0u32;
        while y as f64 + crop_h * scale <= height as f64 {
            let mut x = 0u32;
            while x as f64 + crop_w * scale <= width as f64 {
                candidates.push(CropRect::new(x, y, x + rect_w, y + rect_h));
                x += step;
            }
            y += step;
        }
    }

    candidates
}

/// Scales from `max` down to `min` inclusive, `step` apart.
fn scales(max: f64, min: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| max - i as f64 * step)
        .take_while(move |&s| s > 0.0 && s >= min - SCALE_EPSILON)
}
