//! Parallel candidate scoring.
//!
//! The candidate list is split into one contiguous chunk per available
//! compute unit. Each chunk is scored independently against the shared,
//! read-only [`FeatureMap`] and yields its scores in input order; chunks are
//! returned in submission order.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::importance::importance;
use super::{CropConfig, CropRect, FeatureMap};

/// One point of the downsampled feature grid, channels normalized to 0..=1.
#[derive(Debug, Clone, Copy)]
struct Sample {
    x: u32,
    y: u32,
    skin: f64,
    detail: f64,
    saturation: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    skin: f64,
    detail: f64,
    saturation: f64,
}

/// Score every candidate, returning per-chunk score lists.
///
/// Flattening the result yields one score per candidate in the original
/// candidate order.
#[instrument(level = "debug", skip_all, fields(candidates = candidates.len()))]
pub fn score_candidates(
    features: &FeatureMap,
    candidates: &[CropRect],
    config: &CropConfig,
) -> Vec<Vec<f64>> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let samples = sample_grid(features, config.score_down_sample);
    let workers = available_workers();
    let chunk_len = candidates.len().div_ceil(workers).max(1);

    debug!(workers, chunk_len, samples = samples.len(), "scoring candidates");

    let score = |chunk: &[CropRect]| score_chunk(&samples, chunk, config);

    #[cfg(feature = "rayon")]
    let partials = candidates.par_chunks(chunk_len).map(score).collect();

    #[cfg(not(feature = "rayon"))]
    let partials = candidates.chunks(chunk_len).map(score).collect();

    partials
}

/// Score a single rectangle. Equivalent to one entry of [`score_candidates`].
pub fn score_rect(features: &FeatureMap, rect: &CropRect, config: &CropConfig) -> f64 {
    let samples = sample_grid(features, config.score_down_sample);
    score_chunk(&samples, std::slice::from_ref(rect), config)[0]
}

#[cfg(feature = "rayon")]
fn available_workers() -> usize {
    rayon::current_num_threads().max(1)
}

#[cfg(not(feature = "rayon"))]
fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn sample_grid(features: &FeatureMap, stride: u32) -> Vec<Sample> {
    let stride = stride.max(1);
    let (width, height) = (features.width(), features.height());
    if width < stride || height < stride {
        return Vec::new();
    }

    let mut samples = Vec::new();
    for y in (0..=height - stride).step_by(stride as usize) {
        for x in (0..=width - stride).step_by(stride as usize) {
            let [skin, detail, saturation] = features.get(x, y);
            samples.push(Sample {
                x,
                y,
                skin: skin as f64 / 255.0,
                detail: detail as f64 / 255.0,
                saturation: saturation as f64 / 255.0,
            });
        }
    }
    samples
}

fn score_chunk(samples: &[Sample], crops: &[CropRect], config: &CropConfig) -> Vec<f64> {
    let mut sums = vec![Sums::default(); crops.len()];

    for sample in samples {
        for (crop, sum) in crops.iter().zip(sums.iter_mut()) {
            let imp = importance(crop, sample.x, sample.y, config);
            sum.skin += sample.skin * (sample.detail + config.skin_bias) * imp;
            sum.detail += sample.detail * imp;
            sum.saturation += sample.saturation * (sample.detail + config.saturation_bias) * imp;
        }
    }

    crops
        .iter()
        .zip(sums)
        .map(|(crop, s)| {
            let total = s.detail * config.detail_weight
                + s.skin * config.skin_weight
                + s.saturation * config.saturation_weight;
            total / crop.width() as f64 / crop.height() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract_features;
    use crate::decode::DecodedImage;

    fn features_of(img: &DecodedImage) -> FeatureMap {
        extract_features(img, &CropConfig::default())
    }

    fn patch_image(size: u32, cx: u32, cy: u32, radius: u32) -> DecodedImage {
        let mut img = DecodedImage::filled(size, size, [0, 0, 0]);
        for y in cy - radius..=cy + radius {
            for x in cx - radius..=cx + radius {
                let idx = (y * size + x) as usize * 3;
                img.pixels[idx..idx + 3].copy_from_slice(&[230, 168, 130]);
            }
        }
        img
    }

    #[test]
    fn test_sample_grid_strides_both_axes() {
        let img = DecodedImage::filled(40, 24, [0, 0, 0]);
        let grid = sample_grid(&features_of(&img), 8);
        // x in 0..=32 step 8 (5), y in 0..=16 step 8 (3)
        assert_eq!(grid.len(), 15);
        assert_eq!((grid[5].x, grid[5].y), (0, 8));
    }

    #[test]
    fn test_sample_grid_smaller_than_stride() {
        let img = DecodedImage::filled(5, 5, [0, 0, 0]);
        assert!(sample_grid(&features_of(&img), 8).is_empty());
    }

    #[test]
    fn test_featureless_image_scores_zero() {
        let img = DecodedImage::filled(64, 64, [0, 0, 0]);
        let features = features_of(&img);
        let config = CropConfig::default();
        assert_eq!(score_rect(&features, &CropRect::new(0, 0, 32, 32), &config), 0.0);
    }

    #[test]
    fn test_crop_over_patch_beats_crop_away() {
        let img = patch_image(128, 96, 96, 12);
        let features = features_of(&img);
        let config = CropConfig::default();

        let over = score_rect(&features, &CropRect::new(64, 64, 128, 128), &config);
        let away = score_rect(&features, &CropRect::new(0, 0, 64, 64), &config);
        assert!(over > away, "{} should beat {}", over, away);
        assert!(away < 0.0);
    }

    #[test]
    fn test_chunks_preserve_order_and_count() {
        let img = patch_image(96, 40, 40, 8);
        let features = features_of(&img);
        let config = CropConfig::default();

        let candidates: Vec<CropRect> = (0..37)
            .map(|i| CropRect::new(i, i, i + 48, i + 48))
            .collect();
        let chunks = score_candidates(&features, &candidates, &config);
        let flat: Vec<f64> = chunks.into_iter().flatten().collect();

        assert_eq!(flat.len(), candidates.len());
        for (rect, score) in candidates.iter().zip(&flat) {
            assert_eq!(*score, score_rect(&features, rect, &config));
        }
    }

    #[test]
    fn test_empty_candidates() {
        let img = DecodedImage::filled(16, 16, [0, 0, 0]);
        assert!(score_candidates(&features_of(&img), &[], &CropConfig::default()).is_empty());
    }
}
