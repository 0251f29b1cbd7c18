//! The aging pipeline: a fixed sequence of effects over one raster.
//!
//! Stage order matters for the final look and is always:
//! desaturation, sepia (age > 30), brightness, contrast, tint,
//! vignette, damage.

use crate::{
    AgingEffect, AgingEffectError, AgingEffectResult, AgingParams, Effect,
    base_effect::{BrightnessConfig, ContrastConfig, SaturationConfig},
    damage_effect::{DamageConfig, ScratchSource},
    filter_effect::{SepiaConfig, TintConfig, VignetteConfig},
};
use image::RgbImage;
use std::time::Instant;

/// Run the pipeline with fresh randomness for the damage stage.
pub fn process(image: &RgbImage, params: &AgingParams) -> AgingEffectResult<RgbImage> {
    process_with(image, params, &mut rand::rng())
}

/// Run the pipeline, drawing scratch positions from `source`.
pub fn process_with<S: ScratchSource + ?Sized>(
    image: &RgbImage,
    params: &AgingParams,
    source: &mut S,
) -> AgingEffectResult<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AgingEffectError::InvalidImage(format!(
            "image has zero size: {width}x{height}"
        )));
    }

    let params = params.clamped();
    let start = Instant::now();
    let mut output = image.clone();

    for effect in stages(&params) {
        log::debug!("applying {} stage", effect.name());
        effect.apply(&mut output)?;
    }

    let columns = DamageConfig::new()
        .with_level(params.damage)
        .apply_with(&mut output, source)?;

    log::info!(
        "aged {}x{} image in {:?} (params: {:?}, scratches: {})",
        width,
        height,
        start.elapsed(),
        params,
        columns.len()
    );

    Ok(output)
}

/// The deterministic stages for a clamped parameter set. Sepia, tint and
/// vignette are left out while their slider keeps them inactive. Damage is
/// applied separately since it needs a randomness source.
pub fn stages(params: &AgingParams) -> Vec<AgingEffect> {
    let mut stages = vec![AgingEffect::Saturation(
        SaturationConfig::new().with_factor(params.saturation_factor()),
    )];

    if params.age > 30 {
        stages.push(AgingEffect::Sepia(
            SepiaConfig::new().with_intensity(params.sepia_intensity()),
        ));
    }

    stages.push(AgingEffect::Brightness(
        BrightnessConfig::new().with_factor(params.brightness_factor()),
    ));
    stages.push(AgingEffect::Contrast(
        ContrastConfig::new().with_factor(params.contrast_factor()),
    ));

    if params.tint != 0 {
        stages.push(AgingEffect::Tint(TintConfig::new().with_tint(params.tint)));
    }

    if params.vignette > 0 {
        stages.push(AgingEffect::Vignette(
            VignetteConfig::new().with_intensity(params.vignette),
        ));
    }

    stages
}
