//! Image resampling used by the analysis prescaler.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Downscale an image by area averaging.
///
/// Much faster than the convolution filters of [`resize`] and free of
/// aliasing for large reductions. Only valid when the target is no larger
/// than the source on either axis.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the target is empty or larger
/// than the source, `DecodeError::CorruptedFile` for a malformed buffer.
pub fn downsample_area(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 || width > image.width || height > image.height {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::thumbnail(&rgb_image, width, height);

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Dimensions of `width x height` scaled by `factor`, rounded to the nearest
/// pixel and never below 1x1.
pub fn scale_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let new_width = (width as f64 * factor).round() as u32;
    let new_height = (height as f64 * factor).round() as u32;
    (new_width.max(1), new_height.max(1))
}
