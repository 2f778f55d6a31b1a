//! Photomosaic construction from a source image and a thumbnail index

use crate::color::reduce_grid;
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressReporter;
use crate::mosaic::index::MatchIndex;
use crate::mosaic::reassembly::{TileSource, from_references};
use crate::spatial::{Grid, tile};
use image::RgbImage;
use rand::Rng;
use tracing::{debug, info};

/// Choose a thumbnail key for every tile of `image`
///
/// Block colors are reduced in parallel. Lookups then run in row-major order
/// so that fallback draws from `rng` are reproducible for a given seed.
///
/// # Errors
///
/// Returns an error if:
/// - No whole tile of `tile_size` fits into the image
/// - The index is empty
pub fn plan_mosaic<R>(
    image: &RgbImage,
    tile_size: u32,
    index: &MatchIndex,
    rng: &mut R,
    progress: Option<&ProgressReporter>,
) -> Result<Grid<String>>
where
    R: Rng + ?Sized,
{
    let blocks = tile(image, tile_size)?;
    let colors = reduce_grid(&blocks)?;

    if let Some(pm) = progress {
        pm.start("matching", colors.len());
    }

    let mut keys = Vec::with_capacity(colors.len());
    for color in &colors {
        let key = index.nearest_match(*color, rng)?;
        debug!(
            "Matched average color ({}, {}, {}) to {key}",
            color.r(),
            color.g(),
            color.b()
        );
        keys.push(key.to_string());
        if let Some(pm) = progress {
            pm.advance();
        }
    }

    if let Some(pm) = progress {
        pm.finish();
    }

    Grid::from_shape_vec(colors.dim(), keys).map_err(|e| {
        invalid_parameter("grid", &format!("{:?}", colors.dim()), &e.to_string())
    })
}

/// Build a photomosaic of `image` from thumbnails held in `source`
///
/// Each `tile_size` block is replaced by the thumbnail chosen by
/// [`plan_mosaic`]. The output tile size is the thumbnail size, not
/// `tile_size`.
///
/// # Errors
///
/// Returns an error if planning fails or a thumbnail cannot be loaded or has
/// a different size from the first one
pub fn build_mosaic<R, S>(
    image: &RgbImage,
    tile_size: u32,
    index: &MatchIndex,
    source: &S,
    rng: &mut R,
    progress: Option<&ProgressReporter>,
) -> Result<RgbImage>
where
    R: Rng + ?Sized,
    S: TileSource + ?Sized,
{
    let plan = plan_mosaic(image, tile_size, index, rng, progress)?;
    let (rows, cols) = plan.dim();
    info!("Patching {rows} x {cols} thumbnails into the mosaic");
    from_references(&plan, source)
}
