/// Aging pipeline example
/// Renders every preset over a test image (or `data/test.png` when present)

use aging_effect::{Preset, codec, process};
use anyhow::Result;
use image::{Rgb, RgbImage};
use std::{fs, path::Path, time::Instant};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output_dir = Path::new("tmp");
    fs::create_dir_all(output_dir)?;

    let img_path = Path::new("data/test.png");
    let img = if img_path.exists() {
        codec::open(img_path)?
    } else {
        log::info!("{} not found, using a generated gradient", img_path.display());
        RgbImage::from_fn(800, 600, |x, y| {
            Rgb([
                (x * 255 / 800) as u8,
                (y * 255 / 600) as u8,
                ((x + y) * 255 / 1400) as u8,
            ])
        })
    };

    for preset in Preset::all_presets() {
        let start = Instant::now();
        let aged = process(&img, &preset.params())?;
        let bytes = codec::encode_jpeg(&aged, codec::DEFAULT_JPEG_QUALITY)?;

        let filename = format!("aging_{}.jpg", preset.name().to_lowercase());
        fs::write(output_dir.join(&filename), bytes)?;
        log::info!("✓ Generated {} in {:?}", filename, start.elapsed());
    }

    log::info!("Images saved to: tmp/");

    Ok(())
}
