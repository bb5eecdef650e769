use crate::LayoutError;
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` interval for uniform draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn validate(&self, name: &str) -> Result<(), LayoutError> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "{} must be finite",
                name
            )));
        }
        if self.min > self.max {
            return Err(LayoutError::InvalidConfig(format!(
                "{} has min {} greater than max {}",
                name, self.min, self.max
            )));
        }
        // Uniform sampling needs a finite width as well as finite ends.
        if !(self.max - self.min).is_finite() {
            return Err(LayoutError::InvalidConfig(format!(
                "{} is too wide to sample: [{}, {}]",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Lowest and highest multiplier `k` with `k * step_deg` inside `[min, max]`.
pub(crate) fn step_bounds(step_deg: f32, min: f32, max: f32) -> Option<(i32, i32)> {
    let lowest = (min / step_deg).ceil() as i32;
    let highest = (max / step_deg).floor() as i32;
    (lowest <= highest).then_some((lowest, highest))
}

/// How each symbol's rotation is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RotationMode {
    /// Every symbol upright.
    Fixed,
    /// Uniform angle within `[min, max]` degrees.
    Free { min: f32, max: f32 },
    /// A random multiple of `step_deg` within `[min, max]`.
    Steps { step_deg: f32, min: f32, max: f32 },
}

impl Default for RotationMode {
    fn default() -> Self {
        RotationMode::Free {
            min: -180.0,
            max: 180.0,
        }
    }
}

/// Radial arrangement of the slots on a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RingLayout {
    /// All slots on one ring at `ring_radius_ratio`.
    #[default]
    Single,
    /// The first `inner_share` of the slots on an inner ring, the rest outside.
    Double {
        inner_ratio: f32,
        outer_ratio: f32,
        inner_share: f32,
    },
    /// Double ring for eight or more slots, single ring otherwise.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 3] = [SizeCategory::Small, SizeCategory::Medium, SizeCategory::Large];
}

/// Relative likelihood of each size category. Normalized at use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeWeights {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl Default for SizeWeights {
    fn default() -> Self {
        Self {
            small: 0.3,
            medium: 0.5,
            large: 0.2,
        }
    }
}

impl SizeWeights {
    /// Weights scaled to sum to 1, in `SizeCategory::ALL` order.
    pub fn normalized(&self) -> Result<[f32; 3], LayoutError> {
        let raw = [self.small, self.medium, self.large];
        if raw.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "size weights must be finite and non-negative, got {:?}",
                raw
            )));
        }
        let total: f32 = raw.iter().sum();
        if total <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "size weights must not all be zero".to_string(),
            ));
        }
        Ok(raw.map(|w| w / total))
    }
}

/// Controls placement randomness. Reused for every card of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizationConfig {
    /// Absent means a fresh OS-entropy seed per document.
    pub seed: Option<u64>,
    pub rotation: RotationMode,
    pub base_scale: Range,
    pub angular_jitter_deg: f32,
    pub radial_jitter_mm: f32,
    pub ring_radius_ratio: f32,
    pub ring_layout: RingLayout,
    pub size_weights: SizeWeights,
    pub small_multiplier: Range,
    pub medium_multiplier: Range,
    pub large_multiplier: Range,
    pub overlap_margin_mm: f32,
    /// Side of a symbol's bounding square as a fraction of the card diameter.
    pub symbol_box_fraction: f32,
}

impl Default for RandomizationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rotation: RotationMode::default(),
            base_scale: Range::new(0.9, 1.05),
            angular_jitter_deg: 8.0,
            radial_jitter_mm: 2.0,
            ring_radius_ratio: 0.6,
            ring_layout: RingLayout::Single,
            size_weights: SizeWeights::default(),
            small_multiplier: Range::new(0.7, 0.85),
            medium_multiplier: Range::new(0.9, 1.1),
            large_multiplier: Range::new(1.15, 1.3),
            overlap_margin_mm: 1.0,
            symbol_box_fraction: 0.2,
        }
    }
}

impl RandomizationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn multiplier(&self, category: SizeCategory) -> Range {
        match category {
            SizeCategory::Small => self.small_multiplier,
            SizeCategory::Medium => self.medium_multiplier,
            SizeCategory::Large => self.large_multiplier,
        }
    }

    /// Checks every numeric field; called before any card is laid out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.base_scale.validate("base_scale")?;
        self.small_multiplier.validate("small_multiplier")?;
        self.medium_multiplier.validate("medium_multiplier")?;
        self.large_multiplier.validate("large_multiplier")?;
        self.size_weights.normalized()?;

        if self.base_scale.min <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "base_scale must be positive".to_string(),
            ));
        }
        for category in SizeCategory::ALL {
            if self.multiplier(category).min <= 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{:?} multiplier must be positive",
                    category
                )));
            }
        }

        match self.rotation {
            RotationMode::Fixed => {}
            RotationMode::Free { min, max } => Range::new(min, max).validate("rotation")?,
            RotationMode::Steps { step_deg, min, max } => {
                Range::new(min, max).validate("rotation")?;
                if !(step_deg.is_finite() && step_deg > 0.0) {
                    return Err(LayoutError::InvalidConfig(format!(
                        "rotation step must be positive, got {}",
                        step_deg
                    )));
                }
                if step_bounds(step_deg, min, max).is_none() {
                    return Err(LayoutError::InvalidConfig(format!(
                        "no multiple of {} degrees lies within [{}, {}]",
                        step_deg, min, max
                    )));
                }
            }
        }

        check_jitter("angular_jitter_deg", self.angular_jitter_deg)?;
        check_jitter("radial_jitter_mm", self.radial_jitter_mm)?;
        check_non_negative("overlap_margin_mm", self.overlap_margin_mm)?;
        check_ratio("ring_radius_ratio", self.ring_radius_ratio)?;

        if let RingLayout::Double {
            inner_ratio,
            outer_ratio,
            inner_share,
        } = self.ring_layout
        {
            check_ratio("inner_ratio", inner_ratio)?;
            check_ratio("outer_ratio", outer_ratio)?;
            check_ratio("inner_share", inner_share)?;
        }

        if !(self.symbol_box_fraction.is_finite()
            && self.symbol_box_fraction > 0.0
            && self.symbol_box_fraction <= 1.0)
        {
            return Err(LayoutError::InvalidConfig(format!(
                "symbol_box_fraction must be in (0, 1], got {}",
                self.symbol_box_fraction
            )));
        }
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

/// Jitter is drawn from `[-value, value]`, so that interval must be sampleable.
fn check_jitter(name: &str, value: f32) -> Result<(), LayoutError> {
    check_non_negative(name, value)?;
    Range::new(-value, value).validate(name)
}

fn check_ratio(name: &str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RandomizationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weights_normalize_to_one() {
        let weights = SizeWeights {
            small: 1.0,
            medium: 2.0,
            large: 1.0,
        };
        assert_eq!(weights.normalized().unwrap(), [0.25, 0.5, 0.25]);
    }

    #[test]
    fn test_rejects_negative_or_zero_weights() {
        let negative = SizeWeights {
            small: -0.1,
            medium: 1.0,
            large: 0.0,
        };
        assert!(negative.normalized().is_err());

        let zero = SizeWeights {
            small: 0.0,
            medium: 0.0,
            large: 0.0,
        };
        assert!(zero.normalized().is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = RandomizationConfig {
            base_scale: Range::new(1.2, 0.8),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_rotation_step() {
        let config = RandomizationConfig {
            rotation: RotationMode::Steps {
                step_deg: 0.0,
                min: 0.0,
                max: 270.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_range_too_wide_to_sample() {
        let config = RandomizationConfig {
            rotation: RotationMode::Free {
                min: -3e38,
                max: 3e38,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));

        let config = RandomizationConfig {
            angular_jitter_deg: 2e38,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_steps_without_a_multiple_in_range() {
        let config = RandomizationConfig {
            rotation: RotationMode::Steps {
                step_deg: 90.0,
                min: 10.0,
                max: 80.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
        assert_eq!(step_bounds(90.0, -180.0, 180.0), Some((-2, 2)));
        assert_eq!(step_bounds(90.0, 10.0, 80.0), None);
    }

    #[test]
    fn test_deserializes_partial_config() {
        let json = r#"{
            "seed": 42,
            "rotation": { "mode": "steps", "step_deg": 90.0, "min": 0.0, "max": 270.0 },
            "ring_layout": { "kind": "auto" },
            "size_weights": { "small": 1.0, "medium": 1.0, "large": 1.0 }
        }"#;
        let config: RandomizationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ring_layout, RingLayout::Auto);
        assert_eq!(config.overlap_margin_mm, 1.0);
        assert!(config.validate().is_ok());
    }
}
