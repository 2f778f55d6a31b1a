//! Pixel-art and photomosaic generation from square image tiles
//!
//! An image is cut into a grid of square blocks, each block is reduced to its
//! average color, and the grid is reassembled either from solid color blocks
//! (pixelation) or from the closest-colored thumbnails of a precomputed cache
//! (photomosaic).

#![forbid(unsafe_code)]

/// Average-color reduction and color distance
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Match Index, reassembly, pixelation and mosaic pipelines
pub mod mosaic;
/// Tiling of rasters into block grids
pub mod spatial;

pub use io::error::{MosaicError, Result};
