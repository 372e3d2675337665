//! Countdown layout: decomposition to positioned primitives.

/// The layout engine.
pub mod engine;
