//! Request parameters to a bounded [`RenderConfig`](model::RenderConfig).

/// Per-profile clamp ranges and defaults.
pub mod limits;
/// Resolved, immutable render configuration.
pub mod model;
/// Untyped inbound request parameters.
pub mod params;
/// The total `RawParams -> RenderConfig` resolver.
pub mod resolve;
