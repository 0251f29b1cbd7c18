pub mod base_effect;
pub mod codec;
pub mod damage_effect;
pub mod filter_effect;
pub mod params;
pub mod pipeline;

pub use params::{AgingParams, Preset};
pub use pipeline::{process, process_with};

use image::RgbImage;

pub type AgingEffectResult<T> = Result<T, AgingEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum AgingEffectError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub trait Effect {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()>;
}

/// One stage of the aging pipeline, in the order the pipeline runs them.
#[derive(Debug, Clone)]
pub enum AgingEffect {
    Saturation(base_effect::SaturationConfig),
    Sepia(filter_effect::SepiaConfig),
    Brightness(base_effect::BrightnessConfig),
    Contrast(base_effect::ContrastConfig),
    Tint(filter_effect::TintConfig),
    Vignette(filter_effect::VignetteConfig),
    Damage(damage_effect::DamageConfig),
}

impl AgingEffect {
    pub fn name(&self) -> &'static str {
        match self {
            AgingEffect::Saturation(_) => "saturation",
            AgingEffect::Sepia(_) => "sepia",
            AgingEffect::Brightness(_) => "brightness",
            AgingEffect::Contrast(_) => "contrast",
            AgingEffect::Tint(_) => "tint",
            AgingEffect::Vignette(_) => "vignette",
            AgingEffect::Damage(_) => "damage",
        }
    }
}

impl Effect for AgingEffect {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        match self {
            AgingEffect::Saturation(config) => config.apply(image),
            AgingEffect::Sepia(config) => config.apply(image),
            AgingEffect::Brightness(config) => config.apply(image),
            AgingEffect::Contrast(config) => config.apply(image),
            AgingEffect::Tint(config) => config.apply(image),
            AgingEffect::Vignette(config) => config.apply(image),
            AgingEffect::Damage(config) => config.apply(image),
        }
    }
}

/// Luma per ITU-R 601-2, the same weights the grayscale conversion uses.
pub(crate) fn luma(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 * 299.0 + g as f32 * 587.0 + b as f32 * 114.0) / 1000.0
}

/// Linear interpolation from `from` toward `to`, rounded and clamped to a channel value.
pub(crate) fn blend_channel(from: f32, to: f32, alpha: f32) -> u8 {
    (from + (to - from) * alpha).round().clamp(0.0, 255.0) as u8
}
