//! Luma weighting used by the feature extractor.
//!
//! The weights are BT.709-style with a boosted blue term. They sum to 1.3,
//! so luma of a white pixel is about 331 rather than 255; brightness gates
//! divide by 255 and therefore treat bright neutral pixels as "above 1.0".

/// Weight applied to the red channel.
pub const LUMA_R: f64 = 0.0722;

/// Weight applied to the green channel.
pub const LUMA_G: f64 = 0.7152;

/// Weight applied to the blue channel.
pub const LUMA_B: f64 = 0.5126;

/// Calculate luma from u8 RGB values.
///
/// # Returns
/// Unclamped luma in the range 0.0 to ~331.5.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Luma of every pixel of an RGB buffer, in row-major order.
pub fn luma_plane(pixels: &[u8]) -> Vec<f64> {
    pixels
        .chunks_exact(3)
        .map(|p| luma(p[0], p[1], p[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_black() {
        assert_eq!(luma(0, 0, 0), 0.0);
    }

    #[test]
    fn test_luma_white_exceeds_255() {
        let white = luma(255, 255, 255);
        assert!((white - 1.3 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_luma_channel_weights() {
        assert!((luma(255, 0, 0) - 18.411).abs() < 1e-3);
        assert!((luma(0, 255, 0) - 182.376).abs() < 1e-3);
        assert!((luma(0, 0, 255) - 130.713).abs() < 1e-3);
    }

    #[test]
    fn test_luma_plane_order() {
        let pixels = [0, 0, 0, 0, 255, 0];
        let plane = luma_plane(&pixels);
        assert_eq!(plane.len(), 2);
        assert_eq!(plane[0], 0.0);
        assert!(plane[1] > 180.0);
    }
}
