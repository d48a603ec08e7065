use crate::{
    AugmentError, AugmentResult,
    catalog::{AngleRange, FactorRange},
};
use derivative::Derivative;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Tuning for the random augmentation pass.
///
/// The defaults are the fixed constants of the catalog: a transform fires
/// when its draw is `>= 0.66`, enhancements sample a factor in `[0.4, 1.6]`,
/// rotation an integer angle in `[-20, 20]` and crop a factor in `[0.5, 1.0]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
#[non_exhaustive]
pub struct AugmentConfig {
    #[derivative(Default(value = "0.66"))]
    pub apply_threshold: f64,

    #[derivative(Default(value = "FactorRange::new(0.4, 1.6)"))]
    pub enhance_factor: FactorRange,

    #[derivative(Default(value = "AngleRange::new(-20, 20)"))]
    pub rotate_angle: AngleRange,

    #[derivative(Default(value = "FactorRange::new(0.5, 1.0)"))]
    pub crop_factor: FactorRange,
}

impl AugmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> AugmentResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> AugmentResult<Self> {
        let path = path.as_ref();
        log::debug!("loading augment config from {}", path.display());

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> AugmentResult<()> {
        if !(0.0..=1.0).contains(&self.apply_threshold) {
            return Err(AugmentError::InvalidParameter(format!(
                "apply_threshold must be in [0, 1], got {}",
                self.apply_threshold
            )));
        }

        self.enhance_factor.validate("enhance_factor")?;
        if self.enhance_factor.min < 0.0 {
            return Err(AugmentError::InvalidParameter(format!(
                "enhance_factor must not go below 0, got {}",
                self.enhance_factor.min
            )));
        }

        self.rotate_angle.validate("rotate_angle")?;

        self.crop_factor.validate("crop_factor")?;
        if self.crop_factor.min <= 0.0 || self.crop_factor.max > 1.0 {
            return Err(AugmentError::InvalidParameter(format!(
                "crop_factor must stay within (0, 1], got [{}, {}]",
                self.crop_factor.min, self.crop_factor.max
            )));
        }

        Ok(())
    }
}
