//! Pixel cropping.
//!
//! Two entry points share one copy loop: [`apply_crop_rect`] takes the pixel
//! rectangle produced by the analysis, [`apply_crop`] takes normalized
//! coordinates (0.0 to 1.0 relative to the image size).
//!
//! # Example
//!
//! ```ignore
//! let rect = find_best_crop(&image, 1, 1)?;
//! let square = apply_crop_rect(&image, &rect);
//! ```

use crate::analysis::CropRect;
use crate::decode::DecodedImage;

/// Copy the pixels inside `rect` into a new image.
///
/// The rectangle is canonicalized and clamped to the image bounds. The
/// output is never smaller than 1x1.
pub fn apply_crop_rect(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    let rect = rect.canonical();

    let left = rect.min_x.min(image.width.saturating_sub(1));
    let top = rect.min_y.min(image.height.saturating_sub(1));
    let right = rect.max_x.min(image.width);
    let bottom = rect.max_y.min(image.height);

    copy_region(image, left, top, right.saturating_sub(left), bottom.saturating_sub(top))
}

/// Crop with normalized coordinates.
///
/// `left`, `top`, `width` and `height` are fractions of the image size and
/// are clamped into `[0, 1]`. A full crop `(0, 0, 1, 1)` returns a copy.
pub fn apply_crop(image: &DecodedImage, left: f64, top: f64, width: f64, height: f64) -> DecodedImage {
    if left <= 0.0 && top <= 0.0 && width >= 1.0 && height >= 1.0 {
        return image.clone();
    }

    let src_w = image.width as f64;
    let src_h = image.height as f64;
    let to_px = |v: f64, size: f64| (v.clamp(0.0, 1.0) * size).round() as u32;

    let px_left = to_px(left, src_w);
    let px_top = to_px(top, src_h);
    let rect = CropRect::new(
        px_left,
        px_top,
        px_left.saturating_add(to_px(width, src_w)),
        px_top.saturating_add(to_px(height, src_h)),
    );

    apply_crop_rect(image, &rect)
}

fn copy_region(image: &DecodedImage, left: u32, top: u32, width: u32, height: u32) -> DecodedImage {
    let out_width = width.max(1).min(image.width.saturating_sub(left).max(1));
    let out_height = height.max(1).min(image.height.saturating_sub(top).max(1));

    if image.is_empty() {
        return DecodedImage::filled(out_width, out_height, [0, 0, 0]);
    }

    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * out_height as usize);

    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * 3;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(out_width, out_height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel holds `(y * width + x) % 256` in all channels.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_rect_crop_copies_region() {
        let img = test_image(10, 10);
        let out = apply_crop_rect(&img, &CropRect::new(2, 3, 6, 8));

        assert_eq!((out.width, out.height), (4, 5));
        assert_eq!(out.pixel_at(0, 0), [32, 32, 32]);
        assert_eq!(out.pixel_at(3, 4), [75, 75, 75]);
    }

    #[test]
    fn test_rect_crop_full_image() {
        let img = test_image(12, 7);
        let out = apply_crop_rect(&img, &CropRect::new(0, 0, 12, 7));
        assert_eq!(out, img);
    }

    #[test]
    fn test_rect_crop_clamps_and_canonicalizes() {
        let img = test_image(10, 10);
        let out = apply_crop_rect(&img, &CropRect::new(12, 8, 6, 20));
        // canonical (6, 8)-(12, 20), clamped to (6, 8)-(10, 10)
        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.pixel_at(0, 0), [86, 86, 86]);
    }

    #[test]
    fn test_rect_crop_empty_rect_is_one_pixel() {
        let img = test_image(10, 10);
        let out = apply_crop_rect(&img, &CropRect::new(4, 4, 4, 4));
        assert_eq!((out.width, out.height), (1, 1));
        assert_eq!(out.pixel_at(0, 0), [44, 44, 44]);
    }

    #[test]
    fn test_rect_crop_outside_image() {
        let img = test_image(10, 10);
        let out = apply_crop_rect(&img, &CropRect::new(50, 50, 60, 60));
        assert_eq!((out.width, out.height), (1, 1));
        assert_eq!(out.pixel_at(0, 0), [99, 99, 99]);
    }

    #[test]
    fn test_normalized_center_crop() {
        let img = test_image(10, 10);
        let out = apply_crop(&img, 0.2, 0.2, 0.6, 0.6);
        assert_eq!((out.width, out.height), (6, 6));
        assert_eq!(out.pixels[0], 22);
    }

    #[test]
    fn test_normalized_clamps() {
        let img = test_image(100, 100);
        let out = apply_crop(&img, -0.1, -0.1, 0.5, 0.5);
        assert_eq!((out.width, out.height), (50, 50));

        let out = apply_crop(&img, 0.0, 0.0, 1.5, 1.5);
        assert_eq!((out.width, out.height), (100, 100));
    }

    #[test]
    fn test_normalized_round_trip_with_rect() {
        let img = test_image(80, 40);
        let rect = CropRect::new(20, 10, 60, 30);
        let (l, t, w, h) = rect.to_normalized(img.width, img.height);
        assert_eq!(apply_crop(&img, l, t, w, h), apply_crop_rect(&img, &rect));
    }
}
