pub mod augment;
pub mod catalog;
pub mod colour;
pub mod config;
pub mod display;
pub mod enhance;
pub mod geometry;

pub use augment::{Augmented, Augmenter, AugmentRng, apply_random_augmentations};
pub use catalog::{AngleRange, Catalog, CatalogEntry, FactorRange, Transform};
pub use colour::to_greyscale;
pub use config::AugmentConfig;
pub use display::{compose_grid, load_image, save_figure, save_image, show_image};
pub use enhance::{
    Enhance, change_brightness, change_contrast, change_saturation, change_sharpness, enhance,
};
pub use geometry::{crop_image, flip_image, rotate_image, scale_image};

pub use image::DynamicImage;

pub type AugmentResult<T> = Result<T, AugmentError>;

#[derive(thiserror::Error, Debug)]
pub enum AugmentError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
