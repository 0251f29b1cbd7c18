use crate::{AgingEffectResult, Effect, blend_channel, luma};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;

/// Grayscale conversion, written back as RGB
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleConfig;

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for GrayscaleConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        for pixel in image.pixels_mut() {
            let gray = luma(pixel[0], pixel[1], pixel[2]).round().clamp(0.0, 255.0) as u8;
            pixel[0] = gray;
            pixel[1] = gray;
            pixel[2] = gray;
        }

        Ok(())
    }
}

/// Saturation adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SaturationConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl SaturationConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SaturationConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        // factor 0 = gray, 1 = unchanged, > 1 = more saturated
        let factor = self.factor.max(0.0);
        if factor == 1.0 {
            return Ok(());
        }

        for pixel in image.pixels_mut() {
            // Integer luma, as the grayscale stage would store it
            let gray = luma(pixel[0], pixel[1], pixel[2]).round();
            for i in 0..3 {
                pixel[i] = blend_channel(gray, pixel[i] as f32, factor);
            }
        }

        Ok(())
    }
}

/// Brightness adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BrightnessConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl BrightnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BrightnessConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        if self.factor == 1.0 {
            return Ok(());
        }

        let factor = self.factor.max(0.0);
        for pixel in image.pixels_mut() {
            for i in 0..3 {
                pixel[i] = (pixel[i] as f32 * factor).round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(())
    }
}

/// Contrast adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ContrastConfig {
    fn apply(&self, image: &mut RgbImage) -> AgingEffectResult<()> {
        // new_color = mean + (old_color - mean) * factor, pivoting on the mean luma
        if self.factor == 1.0 {
            return Ok(());
        }

        let mean = mean_luma(image);
        for pixel in image.pixels_mut() {
            for i in 0..3 {
                pixel[i] = blend_channel(mean, pixel[i] as f32, self.factor);
            }
        }

        Ok(())
    }
}

/// Mean luma of the image, rounded to a whole gray level.
pub fn mean_luma(image: &RgbImage) -> f32 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0.0;
    }

    let sum: u64 = image
        .pixels()
        .map(|p| luma(p[0], p[1], p[2]).round() as u64)
        .sum();

    (sum as f64 / count as f64).round() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) * 255 / (width + height).max(1)) as u8,
            ])
        })
    }

    #[test]
    fn test_unit_factors_are_identity() {
        let original = gradient(16, 9);

        let mut image = original.clone();
        SaturationConfig::new().apply(&mut image).unwrap();
        BrightnessConfig::new().apply(&mut image).unwrap();
        ContrastConfig::new().apply(&mut image).unwrap();

        assert_eq!(image, original);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let mut image = gradient(8, 8);
        SaturationConfig::new().with_factor(-0.5).apply(&mut image).unwrap();

        for pixel in image.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }

        let mut gray = gradient(8, 8);
        GrayscaleConfig::new().apply(&mut gray).unwrap();
        assert_eq!(image, gray);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let mut image = RgbImage::from_pixel(2, 2, Rgb([100, 200, 10]));
        BrightnessConfig::new().with_factor(1.5).apply(&mut image).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgb([150, 255, 15]));

        BrightnessConfig::new().with_factor(0.0).apply(&mut image).unwrap();
        assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_contrast_spreads_around_mean() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([100, 100, 100]));
        image.put_pixel(1, 0, Rgb([200, 200, 200]));

        ContrastConfig::new().with_factor(2.0).apply(&mut image).unwrap();

        // mean is 150
        assert_eq!(*image.get_pixel(0, 0), Rgb([50, 50, 50]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([250, 250, 250]));
    }

    #[test]
    fn test_contrast_leaves_flat_image() {
        let original = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
        let mut image = original.clone();
        ContrastConfig::new().with_factor(1.3).apply(&mut image).unwrap();
        assert_eq!(image, original);
    }
}
