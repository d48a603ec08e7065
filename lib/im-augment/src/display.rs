//! Loading, saving and showing images.

use crate::{AugmentError, AugmentResult};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, Rgba, RgbaImage, imageops};
use std::path::{Path, PathBuf};

pub fn load_image(path: impl AsRef<Path>) -> AugmentResult<DynamicImage> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;

    log::debug!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

/// Save `image`, picking the encoder from the file extension.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> AugmentResult<()> {
    let path = path.as_ref();
    image.save(path)?;
    log::debug!("saved {}", path.display());
    Ok(())
}

/// Open `image` in the platform's default viewer.
///
/// The image is written as RGB to a temporary PNG that is kept on disk so
/// the viewer can still read it after this call returns. Returns its path.
pub fn show_image(image: &DynamicImage) -> AugmentResult<PathBuf> {
    let path = write_preview(image)?;
    open::that(&path)?;
    Ok(path)
}

fn write_preview(image: &DynamicImage) -> AugmentResult<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("im-augment-")
        .suffix(".png")
        .tempfile()?;

    DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(file.path(), ImageFormat::Png)?;

    let (_, path) = file.keep().map_err(|e| e.error)?;
    log::debug!("preview written to {}", path.display());
    Ok(path)
}

/// Tile `images` row-major into a `rows` x `cols` grid.
///
/// Every cell is as large as the largest image; images are centred in
/// their cell on a white background.
pub fn compose_grid(images: &[DynamicImage], rows: u32, cols: u32) -> AugmentResult<RgbImage> {
    if rows == 0 || cols == 0 {
        return Err(AugmentError::InvalidParameter(format!(
            "grid needs at least one row and column, got {rows}x{cols}"
        )));
    }

    if images.is_empty() {
        return Err(AugmentError::InvalidParameter(
            "grid needs at least one image".to_string(),
        ));
    }

    if images.len() as u64 > rows as u64 * cols as u64 {
        return Err(AugmentError::InvalidParameter(format!(
            "{} images do not fit a {rows}x{cols} grid",
            images.len()
        )));
    }

    let cell_width = images.iter().map(|img| img.width()).max().unwrap_or(0);
    let cell_height = images.iter().map(|img| img.height()).max().unwrap_or(0);

    let (Some(width), Some(height)) = (cols.checked_mul(cell_width), rows.checked_mul(cell_height))
    else {
        return Err(AugmentError::InvalidParameter(format!(
            "a {rows}x{cols} grid of {cell_width}x{cell_height} cells is too large"
        )));
    };

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    for (index, img) in images.iter().enumerate() {
        let row = index as u32 / cols;
        let col = index as u32 % cols;
        let x = col * cell_width + (cell_width - img.width()) / 2;
        let y = row * cell_height + (cell_height - img.height()) / 2;

        imageops::overlay(&mut canvas, &img.to_rgba8(), x as i64, y as i64);
    }

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

pub fn save_figure(figure: &RgbImage, path: impl AsRef<Path>) -> AugmentResult<()> {
    let path = path.as_ref();
    figure.save(path)?;
    log::info!(
        "figure {}x{} saved to {}",
        figure.width(),
        figure.height(),
        path.display()
    );
    Ok(())
}
