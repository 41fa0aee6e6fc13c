//! Inspection hooks for the crop pipeline.

use super::importance::importance;
use super::{CropConfig, CropRect, FeatureMap};
use crate::decode::DecodedImage;

/// Observer of intermediate pipeline state.
///
/// Every method has a no-op default, so implementors only override the
/// stages they care about.
pub trait AnalysisHook {
    /// The working image after prescaling and its scale factor.
    fn on_prescaled(&mut self, _image: &DecodedImage, _factor: f64) {}

    /// The feature map of the working image.
    fn on_features(&mut self, _features: &FeatureMap) {}

    /// All candidates, in scoring order.
    fn on_candidates(&mut self, _candidates: &[CropRect]) {}

    /// The winning rectangle in working-image coordinates.
    fn on_selected(&mut self, _rect: &CropRect, _score: f64, _features: &FeatureMap) {}
}

/// Hook that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl AnalysisHook for NoopHook {}

/// Render `features` with the importance field of `crop` overlaid.
///
/// Positive importance brightens green, negative importance brightens red.
pub fn render_crop_overlay(features: &FeatureMap, crop: &CropRect, config: &CropConfig) -> DecodedImage {
    let mut out = features.to_image();
    let width = out.width;

    for y in 0..out.height {
        for x in 0..width {
            let imp = importance(crop, x, y, config);
            let idx = (y as usize * width as usize + x as usize) * 3;
            if imp > 0.0 {
                let g = out.pixels[idx + 1] as f64 + imp * 32.0;
                out.pixels[idx + 1] = g.clamp(0.0, 255.0) as u8;
            } else if imp < 0.0 {
                let r = out.pixels[idx] as f64 - imp * 64.0;
                out.pixels[idx] = r.clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract_features;

    #[test]
    fn test_overlay_marks_inside_and_outside() {
        let img = DecodedImage::filled(40, 40, [0, 0, 0]);
        let config = CropConfig::default();
        let features = extract_features(&img, &config);
        let crop = CropRect::new(10, 10, 30, 30);

        let vis = render_crop_overlay(&features, &crop, &config);
        assert_eq!((vis.width, vis.height), (40, 40));

        // outside: -0.5 * -64 = 32 red
        assert_eq!(vis.pixel_at(0, 0), [32, 0, 0]);
        // center: importance > 0 adds green only
        let [r, g, b] = vis.pixel_at(20, 20);
        assert_eq!((r, b), (0, 0));
        assert!(g > 0);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl AnalysisHook for Recorder {
        fn on_features(&mut self, _features: &FeatureMap) {
            self.calls.push("features");
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        let img = DecodedImage::filled(4, 4, [0, 0, 0]);
        let features = extract_features(&img, &CropConfig::default());
        let mut hook = Recorder::default();
        hook.on_prescaled(&img, 1.0);
        hook.on_features(&features);
        hook.on_candidates(&[]);
        hook.on_selected(&CropRect::default(), 0.0, &features);
        assert_eq!(hook.calls, vec!["features"]);
    }
}
