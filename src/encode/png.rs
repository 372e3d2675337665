use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::encode::sink::StillEncoder;
use crate::render::backend::PixelBuffer;

/// PNG still-image encoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngStillEncoder;

impl StillEncoder for PngStillEncoder {
    fn content_type(&self) -> &'static str {
        "image/png"
    }

    fn encode_still(&self, frame: &PixelBuffer) -> anyhow::Result<Vec<u8>> {
        if !frame.is_well_formed() {
            anyhow::bail!(
                "pixel buffer holds {} bytes, expected {}x{} rgba",
                frame.data.len(),
                frame.width,
                frame.height
            );
        }
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode png")?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
