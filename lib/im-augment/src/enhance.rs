//! Photometric enhancements.
//!
//! Every enhancement blends the input against a "degenerate" version of
//! itself: `out = degenerate + factor * (input - degenerate)`. A factor of
//! `1.0` returns the input unchanged, `0.0` returns the degenerate image and
//! anything above `1.0` pushes the property further away from it.

use crate::{AugmentError, AugmentResult, colour};
use image::{DynamicImage, Rgba, Rgba32FImage};

/// Default factor used by the caller tool for the named helpers.
pub const DEFAULT_FACTOR: f32 = 1.8;

/// The visual property an enhancement scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enhance {
    /// Degenerate is the image smoothed with a 3x3 kernel.
    Sharpness,
    /// Degenerate is the greyscale version of the image.
    Saturation,
    /// Degenerate is a uniform grey at the mean luma.
    Contrast,
    /// Degenerate is black.
    Brightness,
}

impl Enhance {
    pub fn name(&self) -> &'static str {
        match self {
            Enhance::Sharpness => "sharpness",
            Enhance::Saturation => "saturation",
            Enhance::Contrast => "contrast",
            Enhance::Brightness => "brightness",
        }
    }

    fn degenerate(&self, image: &Rgba32FImage) -> Rgba32FImage {
        match self {
            Enhance::Sharpness => smooth(image),
            Enhance::Saturation => {
                let mut grey = image.clone();
                for pixel in grey.pixels_mut() {
                    let l = luma(pixel);
                    pixel[0] = l;
                    pixel[1] = l;
                    pixel[2] = l;
                }
                grey
            }
            Enhance::Contrast => {
                let mean = mean_luma(image);
                Rgba32FImage::from_pixel(image.width(), image.height(), Rgba([mean, mean, mean, 1.0]))
            }
            Enhance::Brightness => Rgba32FImage::new(image.width(), image.height()),
        }
    }
}

/// Scale `property` of `image` by `factor`.
///
/// Only the colour channels are touched, alpha is carried over as is. The
/// work is done on normalised float pixels, so the result keeps the colour
/// type and depth of the input. Channel values are clamped to `[0, 1]`.
pub fn enhance(image: DynamicImage, property: Enhance, factor: f32) -> AugmentResult<DynamicImage> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(AugmentError::InvalidParameter(format!(
            "{} factor must be a non-negative number, got {factor}",
            property.name()
        )));
    }

    if factor == 1.0 {
        return Ok(image);
    }

    Ok(colour::map_pixels(image, |pixels| {
        let degenerate = property.degenerate(&pixels);
        blend(&degenerate, pixels, factor)
    }))
}

pub fn change_sharpness(image: DynamicImage, factor: f32) -> AugmentResult<DynamicImage> {
    enhance(image, Enhance::Sharpness, factor)
}

pub fn change_saturation(image: DynamicImage, factor: f32) -> AugmentResult<DynamicImage> {
    enhance(image, Enhance::Saturation, factor)
}

pub fn change_contrast(image: DynamicImage, factor: f32) -> AugmentResult<DynamicImage> {
    enhance(image, Enhance::Contrast, factor)
}

pub fn change_brightness(image: DynamicImage, factor: f32) -> AugmentResult<DynamicImage> {
    enhance(image, Enhance::Brightness, factor)
}

fn blend(degenerate: &Rgba32FImage, mut image: Rgba32FImage, factor: f32) -> Rgba32FImage {
    for (pixel, base) in image.pixels_mut().zip(degenerate.pixels()) {
        for i in 0..3 {
            let d = base[i];
            pixel[i] = (d + (pixel[i] - d) * factor).clamp(0.0, 1.0);
        }
    }

    image
}

// ITU-R 601-2 luma transform.
fn luma(pixel: &Rgba<f32>) -> f32 {
    0.299 * pixel[0] + 0.587 * pixel[1] + 0.114 * pixel[2]
}

fn mean_luma(image: &Rgba32FImage) -> f32 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0.0;
    }

    let sum: f64 = image.pixels().map(|p| luma(p) as f64).sum();
    (sum / count as f64) as f32
}

// Smoothing kernel: [1 1 1; 1 5 1; 1 1 1] / 13. Border pixels are kept.
fn smooth(image: &Rgba32FImage) -> Rgba32FImage {
    let (width, height) = image.dimensions();
    let mut result = image.clone();

    if width < 3 || height < 3 {
        return result;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = [0f32; 3];

            for ky in 0..3 {
                for kx in 0..3 {
                    let weight = if kx == 1 && ky == 1 { 5.0 } else { 1.0 };
                    let pixel = image.get_pixel(x + kx - 1, y + ky - 1);
                    for (c, acc) in sum.iter_mut().enumerate() {
                        *acc += pixel[c] * weight;
                    }
                }
            }

            let pixel = result.get_pixel_mut(x, y);
            for (c, acc) in sum.iter().enumerate() {
                pixel[c] = acc / 13.0;
            }
        }
    }

    result
}
