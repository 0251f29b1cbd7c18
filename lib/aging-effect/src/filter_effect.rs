use crate::{AgingEffectError, AgingEffectResult, Effect, blend_channel, luma};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma, Rgb, RgbImage};

pub const SEPIA_COLOR: Rgb<u8> = Rgb([255, 240, 190]);
pub const WARM_TINT_COLOR: Rgb<u8> = Rgb([255, 150, 0]);
pub const COOL_TINT_COLOR: Rgb<u8> = Rgb([0, 100, 255]);

/// Largest share the sepia overlay takes at full intensity
const SEPIA_MAX_BLEND: f32 = 0.3;

/// Tint blend ratio per slider step, 6% at |tint| = 100
const TINT_BLEND_PER_STEP: f32 = 0.6 / 1000.0;

/// Radii of the vignette falloff, relative to the longer image side
const VIGNETTE_OUTER_RADIUS: f32 = 0.8;
const VIGNETTE_INNER_RADIUS: f32 = 0.4;

/// Blend every pixel toward a solid color.
pub fn blend_solid(image: &mut RgbImage, color: Rgb<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha == 0.0 {
        return;
    }

    for pixel in image.pixels_mut() {
        for i in 0..3 {
            pixel[i] = blend_channel(pixel[i] as f32, color[i] as f32, alpha);
        }
    }
}

/// Sepia tone configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SepiaConfig {
    #[derivative(Default(value = "0.5"))]
    intensity: f32, // [0.0, 1.0]
}

impl SepiaConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SepiaConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        let intensity = self.intensity.clamp(0.0, 1.0);
        if intensity == 0.0 {
            return Ok(());
        }

        let alpha = intensity * SEPIA_MAX_BLEND;
        for pixel in image.pixels_mut() {
            let gray = luma(pixel[0], pixel[1], pixel[2]).round();
            for i in 0..3 {
                pixel[i] = blend_channel(gray, SEPIA_COLOR[i] as f32, alpha);
            }
        }

        Ok(())
    }
}

/// Color wash configuration: positive tint is warm, negative is cool
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct TintConfig {
    #[derivative(Default(value = "0"))]
    tint: i32, // [-100, 100]
}

impl TintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay color and blend ratio, `None` when the tint is neutral.
    pub fn overlay(&self) -> Option<(Rgb<u8>, f32)> {
        let tint = self.tint.clamp(-100, 100);
        match tint.signum() {
            0 => None,
            1 => Some((WARM_TINT_COLOR, tint as f32 * TINT_BLEND_PER_STEP)),
            _ => Some((COOL_TINT_COLOR, tint.unsigned_abs() as f32 * TINT_BLEND_PER_STEP)),
        }
    }
}

impl Effect for TintConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        if let Some((color, ratio)) = self.overlay() {
            blend_solid(image, color, ratio);
        }

        Ok(())
    }
}

pub fn apply_tint(image: &RgbImage, tint_value: i32) -> AgingEffectResult<RgbImage> {
    let mut output = image.clone();
    TintConfig::new().with_tint(tint_value).apply(&mut output)?;
    Ok(output)
}

/// Vignette configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VignetteConfig {
    #[derivative(Default(value = "30"))]
    intensity: i32, // [0, 100]
}

impl VignetteConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for VignetteConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        if self.intensity <= 0 {
            return Ok(());
        }

        let mask = generate_vignette_mask(image.width(), image.height(), self.intensity);
        composite_over_black(image, &mask)
    }
}

/// Radial darkening mask: 0 leaves a pixel untouched, 255 turns it black.
///
/// Nothing is darkened inside `0.4 * max(width, height)` from the center.
/// From there the weight rises linearly with the distance and reaches
/// `255 * intensity / 100` at `0.8 * max(width, height)`.
pub fn generate_vignette_mask(width: u32, height: u32, intensity: i32) -> GrayImage {
    let intensity = intensity.clamp(0, 100);
    if intensity == 0 {
        return GrayImage::new(width, height);
    }

    let max_dim = width.max(height) as f32;
    let outer = max_dim * VIGNETTE_OUTER_RADIUS;
    let inner = max_dim * VIGNETTE_INNER_RADIUS;
    let peak = 255.0 * intensity as f32 / 100.0;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    GrayImage::from_fn(width, height, |x, y| {
        // Sample at the pixel center
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();

        let falloff = ((distance - inner) / (outer - inner)).clamp(0.0, 1.0);
        Luma([(peak * falloff).round() as u8])
    })
}

/// Lerp every pixel toward black by its mask weight.
pub fn composite_over_black(image: &mut RgbImage, mask: &GrayImage) -> AgingEffectResult<()> {
    if image.dimensions() != mask.dimensions() {
        return Err(AgingEffectError::InvalidImage(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }

    for (pixel, weight) in image.pixels_mut().zip(mask.pixels()) {
        let alpha = weight[0] as f32 / 255.0;
        for i in 0..3 {
            pixel[i] = blend_channel(pixel[i] as f32, 0.0, alpha);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_gray(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
    }

    #[test]
    fn test_sepia_turns_gray_warm() {
        let mut image = mid_gray(4, 4);
        SepiaConfig::new().with_intensity(1.0).apply(&mut image).unwrap();

        let pixel = image.get_pixel(0, 0);
        assert!(pixel[0] > pixel[1]);
        assert!(pixel[1] > pixel[2]);
        // 128 + (255 - 128) * 0.3
        assert_eq!(pixel[0], 166);
    }

    #[test]
    fn test_tint_zero_is_noop() {
        let image = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8 * 40, y as u8 * 60, 90]));
        assert_eq!(apply_tint(&image, 0).unwrap(), image);
    }

    #[test]
    fn test_tint_direction() {
        let image = mid_gray(3, 3);

        let warm = apply_tint(&image, 50).unwrap();
        let pixel = warm.get_pixel(1, 1);
        assert!(pixel[0] > 128);
        assert!(pixel[1] > 128);
        assert!(pixel[2] < 128);

        let cool = apply_tint(&image, -50).unwrap();
        let pixel = cool.get_pixel(1, 1);
        assert!(pixel[0] < 128);
        assert!(pixel[2] > 128);
    }

    #[test]
    fn test_tint_is_capped() {
        let black = RgbImage::new(2, 2);
        let warm = apply_tint(&black, 1000).unwrap();
        // at most 6% of 255
        assert!(warm.get_pixel(0, 0)[0] <= 16);

        let (_, ratio) = TintConfig::new().with_tint(-100).overlay().unwrap();
        assert!((ratio - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_vignette_mask_shape() {
        let mask = generate_vignette_mask(100, 100, 100);
        assert_eq!(mask.dimensions(), (100, 100));
        assert_eq!(mask.get_pixel(50, 50)[0], 0);

        let corner = mask.get_pixel(0, 0)[0];
        assert!(corner > 0);
        assert_eq!(corner, mask.get_pixel(99, 99)[0]);

        // weight never drops moving out along the diagonal
        let mut last = 0;
        for i in (0..50).rev() {
            let weight = mask.get_pixel(i, i)[0];
            assert!(weight >= last);
            last = weight;
        }
    }

    #[test]
    fn test_vignette_mask_scales_with_intensity() {
        assert!(generate_vignette_mask(40, 30, 0).pixels().all(|p| p[0] == 0));
        assert!(generate_vignette_mask(40, 30, -20).pixels().all(|p| p[0] == 0));

        let weak = generate_vignette_mask(40, 30, 30);
        let strong = generate_vignette_mask(40, 30, 90);
        for (w, s) in weak.pixels().zip(strong.pixels()) {
            assert!(w[0] <= s[0]);
        }
        assert!(strong.get_pixel(0, 0)[0] > weak.get_pixel(0, 0)[0]);
    }

    #[test]
    fn test_composite_rejects_mismatched_mask() {
        let mut image = mid_gray(4, 4);
        let mask = GrayImage::new(3, 4);
        assert!(composite_over_black(&mut image, &mask).is_err());
    }

    #[test]
    fn test_vignette_darkens_corners() {
        let mut image = mid_gray(64, 48);
        VignetteConfig::new().with_intensity(80).apply(&mut image).unwrap();

        assert_eq!(image.get_pixel(32, 24)[0], 128);
        assert!(image.get_pixel(0, 0)[0] < 128);
        assert!(image.get_pixel(63, 47)[0] < 128);
    }
}
