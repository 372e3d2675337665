use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::sink::{SequenceEncoder, SequenceSettings, TimedBuffer};

/// Animated GIF encoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct GifSequenceEncoder;

impl SequenceEncoder for GifSequenceEncoder {
    fn content_type(&self) -> &'static str {
        "image/gif"
    }

    fn encode_sequence(
        &self,
        frames: &[TimedBuffer],
        settings: SequenceSettings,
    ) -> anyhow::Result<Vec<u8>> {
        let Some(first) = frames.first() else {
            anyhow::bail!("cannot encode an empty frame sequence");
        };
        let (width, height) = (first.buffer.width, first.buffer.height);

        let mut out = Vec::new();
        {
            let speed = i32::from(settings.quality.clamp(1, 30));
            let mut encoder = GifEncoder::new_with_speed(&mut out, speed);
            let repeat = match settings.loop_count {
                0 => Repeat::Infinite,
                n => Repeat::Finite(n),
            };
            encoder.set_repeat(repeat).context("set gif repeat")?;

            for (i, frame) in frames.iter().enumerate() {
                let buf = &frame.buffer;
                if (buf.width, buf.height) != (width, height) {
                    anyhow::bail!(
                        "frame {i} is {}x{}, expected {width}x{height}",
                        buf.width,
                        buf.height
                    );
                }
                let img = RgbaImage::from_raw(buf.width, buf.height, buf.data.clone())
                    .with_context(|| format!("frame {i} pixel buffer has the wrong length"))?;
                let delay = Delay::from_numer_denom_ms(frame.delay_ms, 1);
                encoder
                    .encode_frame(Frame::from_parts(img, 0, 0, delay))
                    .with_context(|| format!("encode gif frame {i}"))?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
