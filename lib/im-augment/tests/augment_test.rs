// cargo test -p im-augment --test augment_test

use im_augment::{
    AugmentConfig, AugmentRng, Augmenter, DynamicImage, Transform, apply_random_augmentations,
    change_sharpness, compose_grid, crop_image, flip_image, load_image, save_figure, save_image,
    scale_image, to_greyscale,
};
use image::{ColorType, Rgb, RgbImage};
use rand::{SeedableRng, rngs::StdRng};

fn init_logger() {
    _ = env_logger::builder().is_test(true).try_init();
}

fn parrots() -> DynamicImage {
    let mut img = RgbImage::new(120, 80);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 2) as u8, (y * 3) as u8, ((x + y) % 256) as u8]);
    }
    DynamicImage::ImageRgb8(img)
}

struct FixedDraws {
    gates: Vec<f64>,
    next: usize,
}

impl AugmentRng for FixedDraws {
    fn gate(&mut self) -> f64 {
        let draw = self.gates[self.next];
        self.next += 1;
        draw
    }

    fn factor(&mut self, min: f32, max: f32) -> f32 {
        (min + max) / 2.0
    }

    fn angle(&mut self, _min: i32, max: i32) -> i32 {
        max
    }
}

#[test]
fn test_high_last_draw_also_fires_crop() {
    init_logger();

    let mut draws = FixedDraws {
        gates: vec![0.70, 0.10, 0.90, 0.20, 0.80, 0.50, 0.99],
        next: 0,
    };

    let rng: &mut dyn AugmentRng = &mut draws;
    let out = Augmenter::default().run(parrots(), rng).unwrap();

    let names: Vec<_> = out.applied.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["sharpness", "contrast", "rotate", "crop"]);
    assert_eq!(out.applied[2], Transform::Rotate(20));
    assert_eq!(out.applied[3], Transform::Crop(0.75));
    assert_eq!(out.image.color(), ColorType::Rgb8);
    assert_eq!((out.image.width(), out.image.height()), (90, 60));
    assert_eq!(draws.next, 7);
}

#[test]
fn test_random_trials() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let out = apply_random_augmentations(parrots(), &mut rng).unwrap();
        assert!(out.width() >= 60 && out.height() >= 40);
    }
}

#[test]
fn test_config_file_drives_augmenter() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("augment.toml");
    std::fs::write(&path, "apply_threshold = 1.0\n")?;

    let augmenter = Augmenter::new(&AugmentConfig::load(&path)?)?;
    let img = parrots();
    let out = augmenter.run(img.clone(), &mut StdRng::seed_from_u64(5))?;

    assert!(out.applied.is_empty());
    assert_eq!(out.image, img);
    Ok(())
}

#[test]
fn test_helper_pipeline() -> anyhow::Result<()> {
    init_logger();

    let dir = tempfile::tempdir()?;
    let input = dir.path().join("parrots.png");
    save_image(&parrots(), &input)?;

    let img = load_image(&input)?;
    let sharp = change_sharpness(img.clone(), 1.8)?;
    let grey = to_greyscale(sharp.clone());
    let small = scale_image(img.clone(), 0.5)?;
    let cropped = crop_image(flip_image(img.clone()), 0.8)?;

    assert_eq!(grey.color(), ColorType::La8);
    assert_eq!((small.width(), small.height()), (60, 40));
    // 120 * (1 - 0.8) / 2 lands just under 12 and truncates to 11
    assert_eq!((cropped.width(), cropped.height()), (98, 66));

    let grid = compose_grid(&[img, sharp, grey, small, cropped], 2, 3)?;
    assert_eq!(grid.dimensions(), (360, 160));

    let figure = dir.path().join("grid.png");
    save_figure(&grid, &figure)?;
    assert!(figure.exists());
    Ok(())
}
