//! Downscaling of large inputs to a bounded working resolution.

use std::borrow::Cow;

use tracing::debug;

use super::{CropConfig, CropError, Resampler};
use crate::decode::{downsample_area, resize, scale_dimensions, DecodedImage, FilterType};

/// Working image plus the factor it was scaled by.
#[derive(Debug)]
pub struct Prescaled<'a> {
    pub image: Cow<'a, DecodedImage>,
    /// Working size divided by original size; `1.0` when untouched.
    pub factor: f64,
}

/// Factor that brings the shorter side of a `width x height` image down to
/// `config.prescale_min`. Never upscales.
pub fn prescale_factor(width: u32, height: u32, config: &CropConfig) -> f64 {
    if !config.prescale {
        return 1.0;
    }

    let shorter = width.min(height) as f64;
    let factor = config.prescale_min / shorter;
    if factor < 1.0 {
        factor
    } else {
        1.0
    }
}

/// Produce the working image for the analysis.
///
/// Small images are borrowed as-is. Larger ones are resampled with the
/// configured [`Resampler`]; if area averaging is unavailable for the
/// requested size the bilinear filter is used instead.
pub fn prescale<'a>(image: &'a DecodedImage, config: &CropConfig) -> Result<Prescaled<'a>, CropError> {
    let factor = prescale_factor(image.width, image.height, config);
    if factor >= 1.0 {
        return Ok(Prescaled {
            image: Cow::Borrowed(image),
            factor: 1.0,
        });
    }

    let (width, height) = scale_dimensions(image.width, image.height, factor);

    let resampled = match config.resampler {
        Resampler::Area => downsample_area(image, width, height).or_else(|err| {
            debug!(%err, "area downsample unavailable, falling back to bilinear");
            resize(image, width, height, FilterType::Bilinear)
        })?,
        Resampler::Bilinear => resize(image, width, height, FilterType::Bilinear)?,
    };

    debug!(
        factor,
        from_width = image.width,
        from_height = image.height,
        to_width = width,
        to_height = height,
        "prescaled image"
    );

    Ok(Prescaled {
        image: Cow::Owned(resampled),
        factor,
    })
}
