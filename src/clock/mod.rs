//! Remaining-time arithmetic.

/// Remaining duration and its unit decomposition.
pub mod countdown;
