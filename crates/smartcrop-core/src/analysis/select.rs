//! Best-candidate selection and mapping back to source coordinates.

use super::CropRect;

/// Pick the highest-scoring candidate.
///
/// `scores` holds the per-chunk lists produced by the scorer; flattened they
/// line up one-to-one with `candidates`. A later candidate replaces the
/// current best only when strictly greater, so ties go to the first one seen.
pub fn select_best(candidates: &[CropRect], scores: &[Vec<f64>]) -> Option<(CropRect, f64)> {
    let mut best: Option<(CropRect, f64)> = None;

    for (rect, &score) in candidates.iter().zip(scores.iter().flatten()) {
        match best {
            Some((_, top)) if score <= top => {}
            // NaN never replaces a real score
            Some(_) if score.is_nan() => {}
            _ => best = Some((*rect, score)),
        }
    }

    best
}

/// Truncate toward zero, saturating at the `u32` range.
#[inline]
pub fn chop(value: f64) -> u32 {
    value.trunc() as u32
}

/// Map a rectangle found on the working image back onto the original.
///
/// Coordinates are divided by `factor`, truncated and clamped to the
/// original `width x height`, then canonicalized.
pub fn map_to_original(rect: &CropRect, factor: f64, width: u32, height: u32) -> CropRect {
    let scale = |v: u32, limit: u32| chop(v as f64 / factor).min(limit);
    CropRect::new(
        scale(rect.min_x, width),
        scale(rect.min_y, height),
        scale(rect.max_x, width),
        scale(rect.max_y, height),
    )
    .canonical()
}
