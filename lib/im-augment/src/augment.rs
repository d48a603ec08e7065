//! Random combined augmentation.
//!
//! Walks the catalog in order and, for every entry, draws a number in
//! `[0, 1)`. Entries whose draw reaches the threshold are applied with a
//! freshly sampled parameter, the rest are skipped. The first failing
//! transform aborts the pass.

use crate::{
    AugmentResult,
    catalog::{Catalog, Transform},
    config::AugmentConfig,
};
use image::DynamicImage;
use rand::Rng;

/// Random source used by the dispatcher.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` gives a
/// reproducible pass.
pub trait AugmentRng {
    /// Uniform draw in `[0, 1)` deciding whether a catalog entry fires.
    fn gate(&mut self) -> f64;

    /// Uniform factor in `[min, max]`.
    fn factor(&mut self, min: f32, max: f32) -> f32;

    /// Uniform integer angle in `[min, max]`.
    fn angle(&mut self, min: i32, max: i32) -> i32;
}

impl<R: Rng> AugmentRng for R {
    fn gate(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn factor(&mut self, min: f32, max: f32) -> f32 {
        self.random_range(min..=max)
    }

    fn angle(&mut self, min: i32, max: i32) -> i32 {
        self.random_range(min..=max)
    }
}

/// Result of a pass: the final image and the transforms that fired, in
/// the order they were applied.
#[derive(Debug, Clone)]
pub struct Augmented {
    pub image: DynamicImage,
    pub applied: Vec<Transform>,
}

#[derive(Debug, Clone)]
pub struct Augmenter {
    threshold: f64,
    catalog: Catalog,
}

impl Augmenter {
    pub fn new(config: &AugmentConfig) -> AugmentResult<Self> {
        config.validate()?;

        Ok(Self {
            threshold: config.apply_threshold,
            catalog: Catalog::from_config(config),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn run<R: AugmentRng + ?Sized>(
        &self,
        image: DynamicImage,
        rng: &mut R,
    ) -> AugmentResult<Augmented> {
        let mut image = image;
        let mut applied = Vec::new();

        for entry in self.catalog.entries() {
            let draw = rng.gate();
            if draw < self.threshold {
                log::trace!("skip {} (draw {draw:.3})", entry.name());
                continue;
            }

            let transform = entry.sample(rng);
            log::debug!("apply {transform} (draw {draw:.3})");

            image = transform.apply(image)?;
            applied.push(transform);
        }

        Ok(Augmented { image, applied })
    }

    pub fn augment<R: AugmentRng + ?Sized>(
        &self,
        image: DynamicImage,
        rng: &mut R,
    ) -> AugmentResult<DynamicImage> {
        Ok(self.run(image, rng)?.image)
    }
}

impl Default for Augmenter {
    fn default() -> Self {
        let config = AugmentConfig::default();
        Self {
            threshold: config.apply_threshold,
            catalog: Catalog::from_config(&config),
        }
    }
}

/// Apply a random subset of the default catalog to `image`.
pub fn apply_random_augmentations<R: AugmentRng + ?Sized>(
    image: DynamicImage,
    rng: &mut R,
) -> AugmentResult<DynamicImage> {
    Augmenter::default().augment(image, rng)
}
