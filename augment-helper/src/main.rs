use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use im_augment::{
    AugmentConfig, Augmenter, DynamicImage, Enhance, compose_grid, crop_image, enhance,
    flip_image, load_image, rotate_image, save_figure, save_image, scale_image, show_image,
    to_greyscale,
    enhance::DEFAULT_FACTOR,
    geometry::{DEFAULT_ANGLE, DEFAULT_CROP_FACTOR, DEFAULT_SCALE_FACTOR},
};
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};

const GRID_MAX_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Op {
    Sharpness,
    Saturation,
    Contrast,
    Brightness,
    Rotate,
    Greyscale,
    Scale,
    Flip,
    Crop,
    Random,
}

#[derive(Parser, Debug)]
#[command(version, about = "Apply image augmentations to a single image")]
struct Args {
    /// Image to augment
    input: PathBuf,

    /// Operation to run
    #[arg(long, value_enum, default_value_t = Op::Random)]
    op: Op,

    /// Factor for enhance, scale and crop operations
    #[arg(short, long)]
    factor: Option<f32>,

    /// Angle in degrees for the rotate operation
    #[arg(short, long, allow_hyphen_values = true)]
    angle: Option<i32>,

    /// Seed for the random operation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of random augmentations to produce
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// TOML file with augmentation tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save the result here (numbered when there are several)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the original and every result as one grid image
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Open the first result in the default viewer
    #[arg(long)]
    show: bool,
}

fn main() -> Result<()> {
    init_logger();

    let args = Args::parse();
    if args.count == 0 {
        bail!("--count must be at least 1");
    }

    let image = load_image(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let results = match args.op {
        Op::Random => random(&args, &image)?,
        op => vec![single(op, &args, image.clone())?],
    };

    if let Some(output) = &args.output {
        for (index, result) in results.iter().enumerate() {
            let path = if results.len() > 1 {
                numbered(output, index)
            } else {
                output.clone()
            };

            save_image(result, &path)
                .with_context(|| format!("failed to save {}", path.display()))?;
            log::info!("saved {}", path.display());
        }
    }

    if let Some(grid_path) = &args.grid {
        let mut images = Vec::with_capacity(results.len() + 1);
        images.push(image);
        images.extend(results.iter().cloned());

        let cols = images.len().min(GRID_MAX_COLUMNS);
        let rows = images.len().div_ceil(cols);
        let figure = compose_grid(&images, rows as u32, cols as u32)?;
        save_figure(&figure, grid_path)
            .with_context(|| format!("failed to save {}", grid_path.display()))?;
    }

    if args.show || (args.output.is_none() && args.grid.is_none()) {
        let path = show_image(&results[0])?;
        log::info!("opened {}", path.display());
    }

    Ok(())
}

fn single(op: Op, args: &Args, image: DynamicImage) -> Result<DynamicImage> {
    let factor = |default: f32| args.factor.unwrap_or(default);

    let out = match op {
        Op::Sharpness => enhance(image, Enhance::Sharpness, factor(DEFAULT_FACTOR))?,
        Op::Saturation => enhance(image, Enhance::Saturation, factor(DEFAULT_FACTOR))?,
        Op::Contrast => enhance(image, Enhance::Contrast, factor(DEFAULT_FACTOR))?,
        Op::Brightness => enhance(image, Enhance::Brightness, factor(DEFAULT_FACTOR))?,
        Op::Rotate => rotate_image(image, args.angle.unwrap_or(DEFAULT_ANGLE)),
        Op::Greyscale => to_greyscale(image),
        Op::Scale => scale_image(image, factor(DEFAULT_SCALE_FACTOR))?,
        Op::Flip => flip_image(image),
        Op::Crop => crop_image(image, factor(DEFAULT_CROP_FACTOR))?,
        Op::Random => bail!("random is not a single operation"),
    };

    log::info!("{op:?} -> {}x{}", out.width(), out.height());
    Ok(out)
}

fn random(args: &Args, image: &DynamicImage) -> Result<Vec<DynamicImage>> {
    let config = match &args.config {
        Some(path) => AugmentConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => AugmentConfig::default(),
    };

    let augmenter = Augmenter::new(&config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut results = Vec::with_capacity(args.count);
    for index in 0..args.count {
        let out = augmenter.run(image.clone(), &mut rng)?;
        let applied: Vec<_> = out.applied.iter().map(|t| t.to_string()).collect();
        log::info!("#{index}: [{}]", applied.join(", "));
        results.push(out.image);
    }

    Ok(results)
}

fn numbered(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index}"),
    };

    path.with_file_name(name)
}

fn init_logger() {
    use std::io::Write;

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_path() {
        assert_eq!(
            numbered(Path::new("/tmp/out.png"), 2),
            PathBuf::from("/tmp/out_2.png")
        );
        assert_eq!(numbered(Path::new("out"), 0), PathBuf::from("out_0"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "augment-helper",
            "in.jpg",
            "--op",
            "rotate",
            "--angle",
            "-15",
            "--output",
            "out.png",
        ]);

        assert_eq!(args.op, Op::Rotate);
        assert_eq!(args.angle, Some(-15));
        assert_eq!(args.count, 1);
        assert!(!args.show);
    }

    #[test]
    fn test_single_crop_uses_default_factor() {
        let args = Args::parse_from(["augment-helper", "in.png", "--op", "crop"]);
        let image = DynamicImage::new_rgb8(100, 50);

        let out = single(Op::Crop, &args, image).unwrap();
        assert_eq!((out.width(), out.height()), (82, 42));
    }
}
