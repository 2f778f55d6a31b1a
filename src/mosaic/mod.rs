//! Mosaic and pixelation pipelines
//!
//! This module contains:
//! - The Match Index answering nearest-color queries
//! - Reassembly of tile grids into rasters
//! - Solid-color pixelation and its animation sequence
//! - Photomosaic planning and construction

/// Nearest-color lookup with early exit
pub mod index;
/// Photomosaic planning and construction
pub mod photomosaic;
/// Solid-color pixelation and animation frames
pub mod pixelate;
/// Grid to raster composition
pub mod reassembly;

pub use index::MatchIndex;
pub use photomosaic::{build_mosaic, plan_mosaic};
pub use pixelate::{pixelate, pixelate_sequence, sequence_percents, solid_blocks};
pub use reassembly::{TileSource, from_references, from_tiles};
