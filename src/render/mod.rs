//! Scene rasterization.

/// Rasterizer contract and pixel buffers.
pub mod backend;
/// `usvg`/`resvg` CPU rasterizer.
pub mod cpu;
/// Scene to SVG document serialization.
pub mod svg;
