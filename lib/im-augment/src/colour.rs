use image::{ColorType, DynamicImage, Rgba32FImage};

/// Convert an image to greyscale, keeping its alpha channel.
///
/// 8-bit input becomes `La8`; deeper input (16-bit and float) becomes
/// `La16` so no precision is dropped below the source depth.
pub fn to_greyscale(image: DynamicImage) -> DynamicImage {
    if is_8bit(image.color()) {
        DynamicImage::ImageLumaA8(image.to_luma_alpha8())
    } else {
        DynamicImage::ImageLumaA16(image.to_luma_alpha16())
    }
}

/// Run `f` on the normalised RGBA float form of `image` and convert the
/// result back to the original colour type.
pub(crate) fn map_pixels(
    image: DynamicImage,
    f: impl FnOnce(Rgba32FImage) -> Rgba32FImage,
) -> DynamicImage {
    let color = image.color();
    let pixels = f(image.into_rgba32f());
    restore(color, pixels)
}

fn is_8bit(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
    )
}

fn restore(color: ColorType, pixels: Rgba32FImage) -> DynamicImage {
    let image = DynamicImage::ImageRgba32F(pixels);
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        _ => image,
    }
}
