//! Geometric transforms: rotate, scale, crop and flip.

use crate::{AugmentError, AugmentResult, colour};
use image::{DynamicImage, Rgba, imageops::FilterType};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

pub const DEFAULT_ANGLE: i32 = 180;
pub const DEFAULT_SCALE_FACTOR: f32 = 0.8;
pub const DEFAULT_CROP_FACTOR: f32 = 0.8;

/// Rotate counter-clockwise by `degrees` about the centre.
///
/// The canvas keeps its size; corners that fall outside are lost and the
/// uncovered area is filled with transparent black.
pub fn rotate_image(image: DynamicImage, degrees: i32) -> DynamicImage {
    if degrees % 360 == 0 {
        return image;
    }

    // imageproc rotates clockwise for positive angles
    let theta = -(degrees as f32).to_radians();
    colour::map_pixels(image, |pixels| {
        rotate_about_center(&pixels, theta, Interpolation::Nearest, Rgba([0.0, 0.0, 0.0, 0.0]))
    })
}

/// Resize both dimensions by `factor`, rounding toward zero.
pub fn scale_image(image: DynamicImage, factor: f32) -> AugmentResult<DynamicImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(AugmentError::InvalidParameter(format!(
            "scale factor must be positive, got {factor}"
        )));
    }

    let width = (image.width() as f64 * factor as f64) as u32;
    let height = (image.height() as f64 * factor as f64) as u32;

    if width == 0 || height == 0 {
        return Err(AugmentError::InvalidParameter(format!(
            "scaling {}x{} by {factor} leaves no pixels",
            image.width(),
            image.height()
        )));
    }

    log::debug!(
        "scale {}x{} -> {width}x{height}",
        image.width(),
        image.height()
    );

    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}

/// Keep the centred `factor` share of each dimension.
///
/// Margins are `dim * (1 - factor) / 2` per axis, rounded toward zero, so
/// the crop rectangle is `(mw, mh, width - mw, height - mh)`.
pub fn crop_image(image: DynamicImage, factor: f32) -> AugmentResult<DynamicImage> {
    if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
        return Err(AugmentError::InvalidParameter(format!(
            "crop factor must be in (0, 1], got {factor}"
        )));
    }

    let (width, height) = (image.width(), image.height());
    let (margin_w, margin_h) = crop_margins(width, height, factor);

    Ok(image.crop_imm(
        margin_w,
        margin_h,
        width - 2 * margin_w,
        height - 2 * margin_h,
    ))
}

/// Mirror left to right.
pub fn flip_image(image: DynamicImage) -> DynamicImage {
    image.fliph()
}

fn crop_margins(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let keep = 1.0 - factor as f64;
    (
        (width as f64 * keep / 2.0) as u32,
        (height as f64 * keep / 2.0) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, ImageBuffer, RgbImage, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 7) as u8, (y * 11) as u8, (x ^ y) as u8, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_crop_full_factor_keeps_size() {
        let out = crop_image(gradient(37, 21), 1.0).unwrap();
        assert_eq!((out.width(), out.height()), (37, 21));
    }

    #[test]
    fn test_crop_margins() {
        // 100 * 0.5 / 2 = 25, 51 * 0.5 / 2 = 12.75 -> 12
        assert_eq!(crop_margins(100, 51, 0.5), (25, 12));

        let img = gradient(100, 51);
        let out = crop_image(img.clone(), 0.5).unwrap();
        assert_eq!((out.width(), out.height()), (50, 27));
        assert_eq!(out.to_rgba8().get_pixel(0, 0), img.to_rgba8().get_pixel(25, 12));
    }

    #[test]
    fn test_crop_rejects_negative_margin() {
        assert!(matches!(
            crop_image(gradient(10, 10), 1.2),
            Err(AugmentError::InvalidParameter(_))
        ));
        assert!(crop_image(gradient(10, 10), 0.0).is_err());
    }

    #[test]
    fn test_scale_half() {
        let out = scale_image(gradient(101, 64), 0.5).unwrap();
        assert_eq!((out.width(), out.height()), (50, 32));
    }

    #[test]
    fn test_scale_to_nothing() {
        assert!(scale_image(gradient(3, 3), 0.1).is_err());
        assert!(scale_image(gradient(3, 3), -1.0).is_err());
    }

    #[test]
    fn test_flip_involution() {
        let img = gradient(13, 9);
        assert_ne!(flip_image(img.clone()), img);
        assert_eq!(flip_image(flip_image(img.clone())), img);
    }

    #[test]
    fn test_flip_mirrors_columns() {
        let img = gradient(5, 2);
        let flipped = flip_image(img.clone()).to_rgba8();
        let src = img.to_rgba8();
        assert_eq!(flipped.get_pixel(0, 1), src.get_pixel(4, 1));
    }

    #[test]
    fn test_rotate_keeps_canvas() {
        let out = rotate_image(gradient(40, 30), 17);
        assert_eq!((out.width(), out.height()), (40, 30));
        assert_eq!(out.color(), ColorType::Rgba8);
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let img = gradient(12, 12);
        assert_eq!(rotate_image(img.clone(), 0), img);
        assert_eq!(rotate_image(img.clone(), -360), img);
    }

    #[test]
    fn test_rotate_fills_rgb_corners_black() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 50, image::Rgb([255, 255, 255])));
        let out = rotate_image(img, 45);

        assert_eq!(out.color(), ColorType::Rgb8);
        assert_eq!(out.to_rgb8().get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(out.to_rgb8().get_pixel(25, 25).0, [255, 255, 255]);
    }

    #[test]
    fn test_rotate_keeps_16bit_depth() {
        let img = DynamicImage::ImageRgba16(ImageBuffer::from_pixel(30, 30, Rgba([12_345u16, 0, 65_535, 65_535])));
        let out = rotate_image(img, 90);

        assert_eq!(out.color(), ColorType::Rgba16);
        assert_eq!(out.to_rgba16().get_pixel(15, 15).0, [12_345, 0, 65_535, 65_535]);
    }
}
