//! Renderer-agnostic scene description.

/// Scene and primitive types.
pub mod model;
