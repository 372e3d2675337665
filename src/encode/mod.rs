//! Pixel buffers to encoded image bytes.

/// Animated GIF encoder.
pub mod gif;
/// Still PNG encoder.
pub mod png;
/// Encoder contracts.
pub mod sink;
