use crate::render::backend::PixelBuffer;

/// One rasterized animation frame with its display time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedBuffer {
    /// Frame pixels.
    pub buffer: PixelBuffer,
    /// Display time in milliseconds, honored exactly as supplied.
    pub delay_ms: u32,
}

/// Container-level settings for an animated encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceSettings {
    /// Number of loops; 0 repeats forever.
    pub loop_count: u16,
    /// Quality/speed factor, 1 (best, slowest) to 30 (fastest).
    pub quality: u8,
}

/// Encodes a single frame.
pub trait StillEncoder: Send + Sync {
    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;
    /// Encode one frame.
    fn encode_still(&self, frame: &PixelBuffer) -> anyhow::Result<Vec<u8>>;
}

/// Encodes an ordered frame sequence into one animated container.
///
/// Either the whole sequence is encoded or an error is returned; no truncated output.
pub trait SequenceEncoder: Send + Sync {
    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;
    /// Encode all frames in order.
    fn encode_sequence(
        &self,
        frames: &[TimedBuffer],
        settings: SequenceSettings,
    ) -> anyhow::Result<Vec<u8>>;
}
