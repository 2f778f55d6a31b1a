//! Spatial partitioning of rasters into tile grids
//!
//! This module contains the Tiler:
//! - Grid type shared by tiling and reassembly
//! - Block views over the source raster
//! - Deterministic row-major partitioning

/// Square block partitioning and block views
pub mod tiler;

pub use tiler::{Block, Grid, PixelBounds, tile};
