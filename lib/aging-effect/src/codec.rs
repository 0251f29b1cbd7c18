use crate::{AgingEffectError, AgingEffectResult};
use image::{ExtendedColorType, ImageEncoder, ImageReader, RgbImage, codecs::jpeg::JpegEncoder};
use std::{io::Cursor, path::Path};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Decode an uploaded image (format guessed from its content) into RGB8.
pub fn decode(bytes: &[u8]) -> AgingEffectResult<RgbImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AgingEffectError::InvalidImage(e.to_string()))?;

    let image = reader
        .decode()
        .map_err(|e| AgingEffectError::InvalidImage(e.to_string()))?
        .to_rgb8();

    check_dimensions(image)
}

pub fn open(path: impl AsRef<Path>) -> AgingEffectResult<RgbImage> {
    let bytes = std::fs::read(path.as_ref())?;
    log::debug!("read {} bytes from {}", bytes.len(), path.as_ref().display());
    decode(&bytes)
}

/// Lossy-encode at `quality` (clamped to 1..=100), preserving dimensions.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> AgingEffectResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AgingEffectError::Encode(format!(
            "cannot encode a {width}x{height} image"
        )));
    }

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| AgingEffectError::Encode(e.to_string()))?;

    log::debug!("encoded {width}x{height} jpeg, {} bytes", buffer.len());
    Ok(buffer)
}

fn check_dimensions(image: RgbImage) -> AgingEffectResult<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(AgingEffectError::InvalidImage(format!(
            "image has zero size: {}x{}",
            image.width(),
            image.height()
        )));
    }

    Ok(image)
}
