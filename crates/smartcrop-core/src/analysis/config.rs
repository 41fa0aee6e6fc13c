//! Tuning constants for the crop heuristic.
//!
//! Every analysis call receives a [`CropConfig`] explicitly; there is no
//! global analyzer state. The defaults reproduce the classic smartcrop
//! weighting and are what [`crate::find_best_crop`] uses.

use serde::{Deserialize, Serialize};

use super::CropError;

/// Upper bound on the number of scales a sweep may visit.
const MAX_SCALE_STEPS: f64 = 1000.0;

/// Resampling strategy used by the prescaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resampler {
    /// Area averaging. Fast and alias-free for reductions; falls back to
    /// bilinear when it cannot be used.
    #[default]
    Area,
    /// Bilinear (triangle) filtering.
    Bilinear,
}

/// Heuristic weights, scale sweep and sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Weight of the detail (edge energy) sum in the final score.
    pub detail_weight: f64,
    /// Reference skin tone as a unit RGB vector.
    pub skin_color: [f64; 3],
    /// Added to the detail term when weighting skin pixels.
    pub skin_bias: f64,
    /// Lower bound of `luma / 255` for a pixel to count as skin.
    pub skin_brightness_min: f64,
    /// Upper bound of `luma / 255` for a pixel to count as skin.
    pub skin_brightness_max: f64,
    /// Skin likelihood a pixel must exceed to register at all.
    pub skin_threshold: f64,
    /// Weight of the skin sum in the final score.
    pub skin_weight: f64,
    /// Lower bound of `luma / 255` for a pixel to count as saturated.
    pub saturation_brightness_min: f64,
    /// Upper bound of `luma / 255` for a pixel to count as saturated.
    pub saturation_brightness_max: f64,
    /// HSL saturation a pixel must exceed to register at all.
    pub saturation_threshold: f64,
    /// Added to the detail term when weighting saturated pixels.
    pub saturation_bias: f64,
    /// Weight of the saturation sum in the final score.
    pub saturation_weight: f64,
    /// Stride of the sampling grid used while scoring.
    pub score_down_sample: u32,
    /// Distance in pixels between candidate origins.
    pub grid_step: u32,
    /// Decrement between candidate scales.
    pub scale_step: f64,
    /// Smallest candidate scale.
    pub min_scale: f64,
    /// Largest candidate scale.
    pub max_scale: f64,
    /// Fraction of the half-extent over which the edge penalty ramps in.
    pub edge_radius: f64,
    /// Edge penalty multiplier; negative to penalize borders.
    pub edge_weight: f64,
    /// Importance of pixels outside the candidate.
    pub outside_importance: f64,
    /// Add the rule-of-thirds bonus to the importance function.
    pub rule_of_thirds: bool,
    /// Downscale large inputs before analysis.
    pub prescale: bool,
    /// Shorter side of the working image when prescaling kicks in.
    pub prescale_min: f64,
    /// Prescaler resampling strategy.
    pub resampler: Resampler,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            detail_weight: 0.2,
            skin_color: [0.78, 0.57, 0.44],
            skin_bias: 0.9,
            skin_brightness_min: 0.2,
            skin_brightness_max: 1.0,
            skin_threshold: 0.8,
            skin_weight: 1.8,
            saturation_brightness_min: 0.05,
            saturation_brightness_max: 0.9,
            saturation_threshold: 0.4,
            saturation_bias: 0.2,
            saturation_weight: 0.3,
            score_down_sample: 8,
            grid_step: 8,
            scale_step: 0.1,
            min_scale: 0.9,
            max_scale: 1.0,
            edge_radius: 0.4,
            edge_weight: -20.0,
            outside_importance: -0.5,
            rule_of_thirds: true,
            prescale: true,
            prescale_min: 400.0,
            resampler: Resampler::Area,
        }
    }
}

impl CropConfig {
    /// Create a configuration with the default heuristic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale sweep bounds and step.
    pub fn with_scale_range(mut self, min_scale: f64, max_scale: f64, scale_step: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale_step = scale_step;
        self
    }

    /// Set the distance between candidate origins.
    pub fn with_grid_step(mut self, step: u32) -> Self {
        self.grid_step = step;
        self
    }

    /// Set the stride of the scoring sample grid.
    pub fn with_score_down_sample(mut self, stride: u32) -> Self {
        self.score_down_sample = stride;
        self
    }

    /// Enable or disable prescaling, with the working shorter side.
    pub fn with_prescale(mut self, enabled: bool, prescale_min: f64) -> Self {
        self.prescale = enabled;
        self.prescale_min = prescale_min;
        self
    }

    /// Set the prescaler resampling strategy.
    pub fn with_resampler(mut self, resampler: Resampler) -> Self {
        self.resampler = resampler;
        self
    }

    /// Enable or disable the rule-of-thirds bonus.
    pub fn with_rule_of_thirds(mut self, enabled: bool) -> Self {
        self.rule_of_thirds = enabled;
        self
    }

    /// Set the detail, skin and saturation weights.
    pub fn with_weights(mut self, detail: f64, skin: f64, saturation: f64) -> Self {
        self.detail_weight = detail;
        self.skin_weight = skin;
        self.saturation_weight = saturation;
        self
    }

    /// Check that the sweep and sampling parameters are usable.
    pub fn validate(&self) -> Result<(), CropError> {
        let invalid = |msg: &str| -> Result<(), CropError> {
            Err(CropError::InvalidConfig(msg.to_string()))
        };

        if !self.scale_step.is_finite() || self.scale_step <= 0.0 {
            return invalid("scale_step must be a positive finite number");
        }
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() || self.min_scale <= 0.0 {
            return invalid("min_scale and max_scale must be positive finite numbers");
        }
        if self.min_scale > self.max_scale {
            return invalid("min_scale must not exceed max_scale");
        }
        if (self.max_scale - self.min_scale) / self.scale_step > MAX_SCALE_STEPS {
            return invalid("scale sweep has too many steps");
        }
        if self.grid_step == 0 {
            return invalid("grid_step must be at least 1");
        }
        if self.score_down_sample == 0 {
            return invalid("score_down_sample must be at least 1");
        }
        if self.prescale && !(self.prescale_min.is_finite() && self.prescale_min > 0.0) {
            return invalid("prescale_min must be a positive finite number");
        }
        if self.skin_threshold >= 1.0 || self.saturation_threshold >= 1.0 {
            return invalid("likelihood thresholds must be below 1.0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CropConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants() {
        let c = CropConfig::new();
        assert_eq!(c.grid_step, 8);
        assert_eq!(c.score_down_sample, 8);
        assert_eq!(c.min_scale, 0.9);
        assert_eq!(c.max_scale, 1.0);
        assert_eq!(c.edge_weight, -20.0);
        assert_eq!(c.outside_importance, -0.5);
        assert_eq!(c.prescale_min, 400.0);
        assert!(c.rule_of_thirds);
    }

    #[test]
    fn test_builders() {
        let c = CropConfig::new()
            .with_scale_range(0.5, 1.0, 0.25)
            .with_grid_step(4)
            .with_score_down_sample(2)
            .with_prescale(false, 200.0)
            .with_resampler(Resampler::Bilinear)
            .with_rule_of_thirds(false);

        assert_eq!(c.min_scale, 0.5);
        assert_eq!(c.scale_step, 0.25);
        assert_eq!(c.grid_step, 4);
        assert_eq!(c.score_down_sample, 2);
        assert!(!c.prescale);
        assert_eq!(c.resampler, Resampler::Bilinear);
        assert!(!c.rule_of_thirds);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sweep() {
        let mut c = CropConfig::default();
        c.scale_step = 0.0;
        assert!(matches!(c.validate(), Err(CropError::InvalidConfig(_))));

        let c = CropConfig::default().with_scale_range(1.0, 0.5, 0.1);
        assert!(c.validate().is_err());

        let c = CropConfig::default().with_scale_range(f64::NAN, 1.0, 0.1);
        assert!(c.validate().is_err());

        let c = CropConfig::default().with_scale_range(0.1, 1.0, 1e-9);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_steps() {
        assert!(CropConfig::default().with_grid_step(0).validate().is_err());
        assert!(CropConfig::default()
            .with_score_down_sample(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_prescale_min_ignored_when_disabled() {
        let c = CropConfig::default().with_prescale(false, 0.0);
        assert!(c.validate().is_ok());
        let c = CropConfig::default().with_prescale(true, 0.0);
        assert!(c.validate().is_err());
    }
}
