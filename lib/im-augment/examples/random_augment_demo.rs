/// Random augmentation example
/// Runs the random pass a few times on a generated gradient and saves the
/// results side by side.

use im_augment::{Augmenter, DynamicImage, compose_grid, save_figure};
use image::{Rgba, RgbaImage};
use rand::{SeedableRng, rngs::StdRng};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let mut img = RgbaImage::new(320, 240);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = (x * 255 / 320) as u8;
        let g = (y * 255 / 240) as u8;
        let b = ((x + y) * 255 / 560) as u8;
        *pixel = Rgba([r, g, b, 255]);
    }
    let img = DynamicImage::ImageRgba8(img);

    let augmenter = Augmenter::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut images = vec![img.clone()];

    for i in 0..7 {
        let out = augmenter.run(img.clone(), &mut rng)?;
        let applied: Vec<_> = out.applied.iter().map(|t| t.to_string()).collect();
        println!("#{i}: [{}]", applied.join(", "));
        images.push(out.image);
    }

    let grid = compose_grid(&images, 2, 4)?;
    save_figure(&grid, output_dir.join("random_augment_grid.png"))?;

    println!("✓ Random augmentations applied successfully!");
    println!("  Grid: tmp/random_augment_grid.png");

    Ok(())
}
