//! Shared value types and the crate error.

/// Canvas, colour and tick primitives.
pub mod core;
/// Error type and result alias.
pub mod error;
