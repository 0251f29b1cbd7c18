use crate::AgingEffectError;
use derivative::Derivative;
use derive_setters::Setters;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const AGE_RANGE: (i32, i32) = (0, 100);
pub const EXPOSURE_RANGE: (i32, i32) = (-100, 100);
pub const TINT_RANGE: (i32, i32) = (-100, 100);
pub const VIGNETTE_RANGE: (i32, i32) = (0, 100);
pub const DAMAGE_RANGE: (i32, i32) = (0, 100);

/// The five slider values driving the aging pipeline.
///
/// Values outside their declared range are accepted here and clamped by
/// [`AgingParams::clamped`], which the pipeline always calls first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Setters, Serialize, Deserialize)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct AgingParams {
    #[derivative(Default(value = "30"))]
    pub age: i32, // [0, 100]

    pub exposure: i32, // [-100, 100]

    pub tint: i32, // [-100, 100]

    pub vignette: i32, // [0, 100]

    #[derivative(Default(value = "15"))]
    pub damage: i32, // [0, 100]
}

impl AgingParams {
    pub fn new(age: i32, exposure: i32, tint: i32, vignette: i32, damage: i32) -> Self {
        Self {
            age,
            exposure,
            tint,
            vignette,
            damage,
        }
    }

    /// All sliders at zero: the pipeline returns the input unchanged.
    pub fn identity() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }

    pub fn clamped(&self) -> Self {
        Self {
            age: self.age.clamp(AGE_RANGE.0, AGE_RANGE.1),
            exposure: self.exposure.clamp(EXPOSURE_RANGE.0, EXPOSURE_RANGE.1),
            tint: self.tint.clamp(TINT_RANGE.0, TINT_RANGE.1),
            vignette: self.vignette.clamp(VIGNETTE_RANGE.0, VIGNETTE_RANGE.1),
            damage: self.damage.clamp(DAMAGE_RANGE.0, DAMAGE_RANGE.1),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.clamped() == Self::identity()
    }

    /// Saturation multiplier for the desaturation stage, never below zero.
    pub fn saturation_factor(&self) -> f32 {
        (1.0 - self.age as f32 * 0.015).max(0.0)
    }

    /// Strength of the sepia stage in [0, 1]; zero up to age 30.
    pub fn sepia_intensity(&self) -> f32 {
        if self.age > 30 {
            ((self.age - 30) as f32 / 70.0).min(1.0)
        } else {
            0.0
        }
    }

    pub fn brightness_factor(&self) -> f32 {
        1.0 + self.exposure as f32 * 0.007
    }

    pub fn contrast_factor(&self) -> f32 {
        1.0 + self.age as f32 * 0.003 + self.exposure.abs() as f32 * 0.004
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Preset {
    None = 0,
    Faded,
    Antique,
    Damaged,
    Cold,
    Warm,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::None => "None",
            Preset::Faded => "Faded",
            Preset::Antique => "Antique",
            Preset::Damaged => "Damaged",
            Preset::Cold => "Cold",
            Preset::Warm => "Warm",
        }
    }

    pub fn params(&self) -> AgingParams {
        match self {
            Preset::None => AgingParams::identity(),
            Preset::Faded => AgingParams::new(35, 10, 0, 15, 0),
            Preset::Antique => AgingParams::new(85, -15, 20, 60, 20),
            Preset::Damaged => AgingParams::new(60, -10, 10, 40, 80),
            Preset::Cold => AgingParams::new(40, -5, -60, 25, 8),
            Preset::Warm => AgingParams::new(45, 5, 70, 30, 8),
        }
    }

    pub fn all_presets() -> &'static [Preset] {
        &[
            Preset::None,
            Preset::Faded,
            Preset::Antique,
            Preset::Damaged,
            Preset::Cold,
            Preset::Warm,
        ]
    }
}

impl FromStr for Preset {
    type Err = AgingEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::all_presets()
            .iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| AgingEffectError::InvalidParameter(format!("unknown preset `{s}`")))
    }
}
