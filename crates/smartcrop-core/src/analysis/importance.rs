//! Positional importance of a pixel relative to a candidate rectangle.

use super::{CropConfig, CropRect};

/// Importance weighting of pixel `(x, y)` for `crop`.
///
/// Pixels outside the crop get `config.outside_importance`. Inside, the
/// weight falls off radially from the center, drops sharply within
/// `edge_radius` of the border, and optionally gains a bonus near the
/// thirds lines.
#[inline]
pub fn importance(crop: &CropRect, x: u32, y: u32, config: &CropConfig) -> f64 {
    if !crop.contains(x, y) {
        return config.outside_importance;
    }

    let xf = (x - crop.min_x) as f64 / crop.width() as f64;
    let yf = (y - crop.min_y) as f64 / crop.height() as f64;

    let px = (0.5 - xf).abs() * 2.0;
    let py = (0.5 - yf).abs() * 2.0;

    let dx = (px - 1.0 + config.edge_radius).max(0.0);
    let dy = (py - 1.0 + config.edge_radius).max(0.0);
    let d = (dx * dx + dy * dy) * config.edge_weight;

    let mut s = 1.41 - (px * px + py * py).sqrt();
    if config.rule_of_thirds {
        s += ((s + d + 0.5).max(0.0) * 1.2) * (thirds(px) + thirds(py));
    }

    s + d
}

/// Peaks at 1.0 for `x = 1/3` and falls to zero within 1/8 either side.
#[inline]
pub fn thirds(x: f64) -> f64 {
    let x = (((x - 1.0 / 3.0 + 1.0) % 2.0) * 0.5 - 0.5) * 16.0;
    (1.0 - x * x).max(0.0)
}
