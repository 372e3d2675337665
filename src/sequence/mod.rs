//! Animated countdowns as ordered frame sequences.

/// Scene-per-tick sequence building.
pub mod frames;
/// Tick to visual-state schedule.
pub mod schedule;
