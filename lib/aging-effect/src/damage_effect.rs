use crate::{AgingEffectResult, Effect, blend_channel};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use rand::Rng;

/// Light gray at low opacity, as scratches on an old print
pub const SCRATCH_COLOR: Rgba<u8> = Rgba([220, 220, 220, 100]);

/// Picks the column of every scratch line.
///
/// Any [`rand::Rng`] is a source, so a seeded `StdRng` gives reproducible
/// scratches while `rand::rng()` gives fresh ones on each call.
pub trait ScratchSource {
    /// A column in `0..width`. Only called with `width > 0`.
    fn next_column(&mut self, width: u32) -> u32;
}

impl<R: Rng + ?Sized> ScratchSource for R {
    fn next_column(&mut self, width: u32) -> u32 {
        self.random_range(0..width)
    }
}

/// Number of scratch lines drawn for a damage level.
pub fn scratch_count(level: i32) -> u32 {
    (level.clamp(0, 100) / 4) as u32
}

/// Damage configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct DamageConfig {
    #[derivative(Default(value = "15"))]
    level: i32, // [0, 100]
}

impl DamageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the scratches and returns the chosen columns in drawing order.
    pub fn apply_with<S: ScratchSource + ?Sized>(
        &self,
        image: &mut RgbImage,
        source: &mut S,
    ) -> AgingEffectResult<Vec<u32>> {
        let count = scratch_count(self.level);
        let (width, height) = image.dimensions();
        if count == 0 || width == 0 || height == 0 {
            return Ok(vec![]);
        }

        let mut overlay = RgbaImage::new(width, height);
        let columns = (0..count)
            .map(|_| source.next_column(width).min(width - 1))
            .collect::<Vec<_>>();

        for &x in &columns {
            // Rows past the bottom edge are clipped by imageproc
            draw_line_segment_mut(
                &mut overlay,
                (x as f32, 0.0),
                (x as f32, height as f32),
                SCRATCH_COLOR,
            );
        }

        composite_overlay(image, &overlay);
        log::debug!("damage: {} scratches at {:?}", count, columns);

        Ok(columns)
    }
}

impl Effect for DamageConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        self.apply_with(image, &mut rand::rng())?;
        Ok(())
    }
}

pub fn apply_damage(image: &RgbImage, damage_level: i32) -> AgingEffectResult<RgbImage> {
    apply_damage_with(image, damage_level, &mut rand::rng())
}

pub fn apply_damage_with<S: ScratchSource + ?Sized>(
    image: &RgbImage,
    damage_level: i32,
    source: &mut S,
) -> AgingEffectResult<RgbImage> {
    let mut output = image.clone();
    DamageConfig::new()
        .with_level(damage_level)
        .apply_with(&mut output, source)?;
    Ok(output)
}

/// Alpha-composite an RGBA overlay onto an opaque image of the same size.
fn composite_overlay(image: &mut RgbImage, overlay: &RgbaImage) {
    for (pixel, top) in image.pixels_mut().zip(overlay.pixels()) {
        if top[3] == 0 {
            continue;
        }

        let alpha = top[3] as f32 / 255.0;
        for i in 0..3 {
            pixel[i] = blend_channel(pixel[i] as f32, top[i] as f32, alpha);
        }
    }
}
