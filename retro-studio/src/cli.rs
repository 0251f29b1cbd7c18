use crate::store::ParamStore;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Give a photo an aged, vintage look", long_about = None)]
pub struct Args {
    /// Input image (JPEG or PNG)
    #[arg(required_unless_present = "list_presets")]
    pub input: Option<PathBuf>,

    /// Output JPEG path [default: <input stem>_retro.jpg]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Age, 0 to 100
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<i32>,

    /// Exposure, -100 to 100
    #[arg(long, allow_negative_numbers = true)]
    pub exposure: Option<i32>,

    /// Tint, -100 (cool) to 100 (warm)
    #[arg(long, allow_negative_numbers = true)]
    pub tint: Option<i32>,

    /// Vignette, 0 to 100
    #[arg(long, allow_negative_numbers = true)]
    pub vignette: Option<i32>,

    /// Damage, 0 to 100
    #[arg(long, allow_negative_numbers = true)]
    pub damage: Option<i32>,

    /// Start from a preset; slider flags still override it
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Seed for reproducible scratches
    #[arg(long)]
    pub seed: Option<u64>,

    /// JPEG quality, 1 to 100
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Config file [default: platform config directory]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the available presets and exit
    #[arg(long)]
    pub list_presets: bool,
}

impl Args {
    /// Writes every slider given on the command line into the store.
    pub fn apply_sliders(&self, store: &mut ParamStore) {
        if let Some(age) = self.age {
            store.set_age(age);
        }
        if let Some(exposure) = self.exposure {
            store.set_exposure(exposure);
        }
        if let Some(tint) = self.tint {
            store.set_tint(tint);
        }
        if let Some(vignette) = self.vignette {
            store.set_vignette(vignette);
        }
        if let Some(damage) = self.damage {
            store.set_damage(damage);
        }
    }
}

/// `photos/train.png` -> `photos/train_retro.jpg`
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());

    input.with_file_name(format!("{stem}{suffix}.jpg"))
}
