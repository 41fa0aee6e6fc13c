//! Content-aware crop analysis.
//!
//! Given an image and a target aspect ratio, finds the rectangle of that
//! ratio which best preserves the interesting content. The pipeline is:
//!
//! 1. **Prescale** large inputs so the shorter side is at most
//!    `prescale_min` pixels.
//! 2. **Extract features**: edge detail, skin likelihood and saturation per
//!    pixel.
//! 3. **Generate candidates** on a regular grid at a few scales.
//! 4. **Score** every candidate in parallel by weighting the features with a
//!    positional importance function.
//! 5. **Select** the best candidate and map it back to source coordinates.
//!
//! # Example
//!
//! ```ignore
//! use smartcrop_core::{decode_image, find_best_crop};
//!
//! let image = decode_image(&bytes)?;
//! let rect = find_best_crop(&image, 16, 9)?;
//! println!("{}x{} at ({}, {})", rect.width(), rect.height(), rect.min_x, rect.min_y);
//! ```

mod candidates;
mod config;
mod debug;
mod features;
mod importance;
mod prescale;
mod score;
mod select;
mod types;

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::decode::DecodedImage;

pub use candidates::{effective_min_scale, generate_candidates};
pub use config::{CropConfig, Resampler};
pub use debug::{render_crop_overlay, AnalysisHook, NoopHook};
pub use features::{extract_features, saturation, skin_likelihood, FeatureMap};
pub use importance::{importance, thirds};
pub use prescale::{prescale, prescale_factor, Prescaled};
pub use score::{score_candidates, score_rect};
pub use select::{chop, map_to_original, select_best};
pub use types::{AspectRatio, CropError, CropRect, ParseAspectRatioError, STANDARD_RATIOS};

/// Find the best crop of `image` for a `width:height` aspect ratio using
/// the default configuration.
///
/// Either ratio component may be zero, in which case the crop is square on
/// the image's shorter side. Both zero is [`CropError::InvalidDimensions`].
pub fn find_best_crop(image: &DecodedImage, width: u32, height: u32) -> Result<CropRect, CropError> {
    find_best_crop_with_config(image, width, height, &CropConfig::default())
}

/// [`find_best_crop`] with explicit heuristics.
pub fn find_best_crop_with_config(
    image: &DecodedImage,
    width: u32,
    height: u32,
    config: &CropConfig,
) -> Result<CropRect, CropError> {
    find_best_crop_with_hook(image, width, height, config, &mut NoopHook)
}

/// [`find_best_crop_with_config`] reporting intermediate state to `hook`.
#[instrument(level = "debug", skip(image, config, hook), fields(image_width = image.width, image_height = image.height))]
pub fn find_best_crop_with_hook(
    image: &DecodedImage,
    width: u32,
    height: u32,
    config: &CropConfig,
    hook: &mut dyn AnalysisHook,
) -> Result<CropRect, CropError> {
    if width == 0 && height == 0 {
        return Err(CropError::InvalidDimensions);
    }
    let analysis = Analysis::prepare(image, config, hook)?;
    analysis.best_crop(AspectRatio::new(width, height), hook)
}

/// Best crop for each of `ratios`, keyed by the ratio's `"W:H"` string.
///
/// The image is prescaled and its features extracted once; only candidate
/// scoring runs per ratio. The first failing ratio aborts the batch.
#[instrument(level = "debug", skip_all, fields(ratios = ratios.len()))]
pub fn find_crops(
    image: &DecodedImage,
    ratios: &[AspectRatio],
    config: &CropConfig,
) -> Result<BTreeMap<String, CropRect>, CropError> {
    if let Some(bad) = ratios.iter().find(|r| r.is_degenerate()) {
        debug!(ratio = %bad, "rejecting degenerate ratio");
        return Err(CropError::InvalidDimensions);
    }

    let mut hook = NoopHook;
    let analysis = Analysis::prepare(image, config, &mut hook)?;

    let mut crops = BTreeMap::new();
    for &ratio in ratios {
        crops.insert(ratio.to_string(), analysis.best_crop(ratio, &mut hook)?);
    }
    Ok(crops)
}

/// Best crop for every ratio in [`STANDARD_RATIOS`].
pub fn find_standard_crops(
    image: &DecodedImage,
    config: &CropConfig,
) -> Result<BTreeMap<String, CropRect>, CropError> {
    find_crops(image, &STANDARD_RATIOS, config)
}

/// Ratio-independent state: the working image and its features.
struct Analysis<'a> {
    width: u32,
    height: u32,
    working: Prescaled<'a>,
    features: FeatureMap,
    config: &'a CropConfig,
}

impl<'a> Analysis<'a> {
    fn prepare(
        image: &'a DecodedImage,
        config: &'a CropConfig,
        hook: &mut dyn AnalysisHook,
    ) -> Result<Self, CropError> {
        if image.is_empty() || !image.is_consistent() {
            return Err(CropError::EmptyImage {
                width: image.width,
                height: image.height,
            });
        }
        config.validate()?;

        let working = prescale(image, config)?;
        hook.on_prescaled(&working.image, working.factor);

        let features = extract_features(&working.image, config);
        hook.on_features(&features);

        Ok(Self {
            width: image.width,
            height: image.height,
            working,
            features,
            config,
        })
    }

    fn best_crop(&self, ratio: AspectRatio, hook: &mut dyn AnalysisHook) -> Result<CropRect, CropError> {
        let config = self.config;
        let factor = self.working.factor;

        let crop_scale = (self.width as f64 / ratio.width as f64).min(self.height as f64 / ratio.height as f64);
        let crop_width = crop_dimension(ratio.width, crop_scale, factor)?;
        let crop_height = crop_dimension(ratio.height, crop_scale, factor)?;
        let min_scale = effective_min_scale(crop_scale, config);

        debug!(
            %ratio,
            crop_scale,
            factor,
            crop_width,
            crop_height,
            min_scale,
            "computed crop size"
        );

        let candidates = generate_candidates(
            self.features.width(),
            self.features.height(),
            crop_width as f64,
            crop_height as f64,
            min_scale,
            config,
        );
        hook.on_candidates(&candidates);
        if candidates.is_empty() {
            return Err(CropError::NoCandidates);
        }

        let scores = score_candidates(&self.features, &candidates, config);
        let (best, score) = select_best(&candidates, &scores).ok_or(CropError::NoCandidates)?;
        hook.on_selected(&best, score, &self.features);

        let mapped = map_to_original(&best, factor, self.width, self.height);
        debug!(
            candidates = candidates.len(),
            chunks = scores.len(),
            score,
            min_x = mapped.min_x,
            min_y = mapped.min_y,
            max_x = mapped.max_x,
            max_y = mapped.max_y,
            "selected crop"
        );

        if mapped.is_empty() {
            return Err(CropError::NoCandidates);
        }
        Ok(mapped)
    }
}

/// Working-image crop size along one axis.
///
/// Zero means "unconstrained" and is resolved later by the candidate
/// generator; a non-zero ratio that truncates to zero pixels cannot be
/// cropped.
fn crop_dimension(ratio: u32, crop_scale: f64, factor: f64) -> Result<u32, CropError> {
    if ratio == 0 {
        return Ok(0);
    }
    match chop(ratio as f64 * crop_scale * factor) {
        0 => Err(CropError::NoCandidates),
        size => Ok(size),
    }
}
