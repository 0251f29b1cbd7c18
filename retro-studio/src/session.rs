use crate::store::ParamStore;
use aging_effect::{codec, process, process_with};
use anyhow::{Context, Result};
use image::RgbImage;
use rand::{SeedableRng, rngs::StdRng};
use std::path::Path;

/// One editing session: a decoded source photo plus its slider state.
#[derive(Debug)]
pub struct Session {
    source: RgbImage,
    store: ParamStore,
    jpeg_quality: u8,
    seed: Option<u64>,
}

impl Session {
    pub fn new(source: RgbImage, store: ParamStore) -> Self {
        Self {
            source,
            store,
            jpeg_quality: codec::DEFAULT_JPEG_QUALITY,
            seed: None,
        }
    }

    pub fn open(path: &Path, store: ParamStore) -> Result<Self> {
        let source = codec::open(path).with_context(|| format!("open {}", path.display()))?;
        log::info!(
            "loaded {} ({}x{})",
            path.display(),
            source.width(),
            source.height()
        );

        Ok(Self::new(source, store))
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Fixes the scratch positions of the damage stage.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn source(&self) -> &RgbImage {
        &self.source
    }

    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParamStore {
        &mut self.store
    }

    /// Runs the pipeline once over the current slider state.
    pub fn render_image(&self) -> Result<RgbImage> {
        let params = self.store.snapshot();
        let image = match self.seed {
            Some(seed) => process_with(&self.source, &params, &mut StdRng::seed_from_u64(seed))?,
            None => process(&self.source, &params)?,
        };

        Ok(image)
    }

    /// Renders and encodes the result for download.
    pub fn render(&self) -> Result<Vec<u8>> {
        let image = self.render_image()?;
        Ok(codec::encode_jpeg(&image, self.jpeg_quality)?)
    }
}
