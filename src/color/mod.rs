//! Color reduction and comparison

/// Truncated per-channel averaging of blocks
pub mod average;
/// Distance metric used for nearest-color matching
pub mod distance;

pub use average::{AverageColor, average_color, reduce_grid};
pub use distance::color_distance;
