//! The fixed catalog used by the random augmentation pass.

use crate::{
    AugmentError, AugmentResult, augment::AugmentRng, config::AugmentConfig, enhance, geometry,
};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range a factor is drawn from uniformly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FactorRange {
    pub min: f32,
    pub max: f32,
}

impl FactorRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: AugmentRng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.factor(self.min, self.max)
    }

    pub(crate) fn validate(&self, name: &str) -> AugmentResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(AugmentError::InvalidParameter(format!(
                "{name} range [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }

        Ok(())
    }
}

/// Inclusive range an angle in degrees is drawn from uniformly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleRange {
    pub min: i32,
    pub max: i32,
}

impl AngleRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: AugmentRng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.angle(self.min, self.max)
    }

    pub(crate) fn validate(&self, name: &str) -> AugmentResult<()> {
        if self.min > self.max {
            return Err(AugmentError::InvalidParameter(format!(
                "{name} range [{}, {}] is empty",
                self.min, self.max
            )));
        }

        Ok(())
    }
}

/// A concrete transform together with its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Sharpness(f32),
    Saturation(f32),
    Contrast(f32),
    Brightness(f32),
    Rotate(i32),
    Flip,
    Crop(f32),
}

impl Transform {
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Sharpness(_) => "sharpness",
            Transform::Saturation(_) => "saturation",
            Transform::Contrast(_) => "contrast",
            Transform::Brightness(_) => "brightness",
            Transform::Rotate(_) => "rotate",
            Transform::Flip => "flip",
            Transform::Crop(_) => "crop",
        }
    }

    pub fn apply(&self, image: DynamicImage) -> AugmentResult<DynamicImage> {
        match *self {
            Transform::Sharpness(factor) => enhance::change_sharpness(image, factor),
            Transform::Saturation(factor) => enhance::change_saturation(image, factor),
            Transform::Contrast(factor) => enhance::change_contrast(image, factor),
            Transform::Brightness(factor) => enhance::change_brightness(image, factor),
            Transform::Rotate(degrees) => Ok(geometry::rotate_image(image, degrees)),
            Transform::Flip => Ok(geometry::flip_image(image)),
            Transform::Crop(factor) => geometry::crop_image(image, factor),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Sharpness(v)
            | Transform::Saturation(v)
            | Transform::Contrast(v)
            | Transform::Brightness(v)
            | Transform::Crop(v) => write!(f, "{}({v:.3})", self.name()),
            Transform::Rotate(degrees) => write!(f, "rotate({degrees})"),
            Transform::Flip => write!(f, "flip"),
        }
    }
}

/// One catalog slot: the transform kind and the policy its parameter is
/// sampled with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogEntry {
    Sharpness(FactorRange),
    Saturation(FactorRange),
    Contrast(FactorRange),
    Brightness(FactorRange),
    Rotate(AngleRange),
    Flip,
    Crop(FactorRange),
}

impl CatalogEntry {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogEntry::Sharpness(_) => "sharpness",
            CatalogEntry::Saturation(_) => "saturation",
            CatalogEntry::Contrast(_) => "contrast",
            CatalogEntry::Brightness(_) => "brightness",
            CatalogEntry::Rotate(_) => "rotate",
            CatalogEntry::Flip => "flip",
            CatalogEntry::Crop(_) => "crop",
        }
    }

    /// Draw a fresh parameter and build the transform.
    pub fn sample<R: AugmentRng + ?Sized>(&self, rng: &mut R) -> Transform {
        match self {
            CatalogEntry::Sharpness(range) => Transform::Sharpness(range.sample(rng)),
            CatalogEntry::Saturation(range) => Transform::Saturation(range.sample(rng)),
            CatalogEntry::Contrast(range) => Transform::Contrast(range.sample(rng)),
            CatalogEntry::Brightness(range) => Transform::Brightness(range.sample(rng)),
            CatalogEntry::Rotate(range) => Transform::Rotate(range.sample(rng)),
            CatalogEntry::Flip => Transform::Flip,
            CatalogEntry::Crop(range) => Transform::Crop(range.sample(rng)),
        }
    }
}

/// Ordered, read-only list of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: [CatalogEntry; Catalog::LEN],
}

impl Catalog {
    pub const LEN: usize = 7;

    pub fn from_config(config: &AugmentConfig) -> Self {
        let factor = config.enhance_factor;
        Self {
            entries: [
                CatalogEntry::Sharpness(factor),
                CatalogEntry::Saturation(factor),
                CatalogEntry::Contrast(factor),
                CatalogEntry::Brightness(factor),
                CatalogEntry::Rotate(config.rotate_angle),
                CatalogEntry::Flip,
                CatalogEntry::Crop(config.crop_factor),
            ],
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_config(&AugmentConfig::default())
    }
}
