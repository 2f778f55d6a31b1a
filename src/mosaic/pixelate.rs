//! Solid-color pixelation and the shrinking-percent animation sequence
//!
//! For the sequence, a frame's tile size is the longer image side divided by
//! the frame's percent. Lower percents therefore give larger tiles and a
//! coarser frame: on a 1000 px wide image, 100 gives 10 px tiles and 10 gives
//! 100 px tiles.

use crate::color::reduce_grid;
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressReporter;
use crate::mosaic::reassembly::from_tiles;
use crate::spatial::{Block, Grid, tile};
use image::RgbImage;
use rayon::prelude::*;
use tracing::debug;

/// Replace every block with a solid raster of its average color
///
/// # Errors
///
/// Returns `EmptyBlock` if any block covers no pixels
pub fn solid_blocks(grid: &Grid<Block<'_>>) -> Result<Grid<RgbImage>> {
    let colors = reduce_grid(grid)?;
    let mut tiles = Vec::with_capacity(colors.len());
    for (block, color) in grid.iter().zip(colors.iter()) {
        tiles.push(RgbImage::from_pixel(
            block.width(),
            block.height(),
            color.to_rgb(),
        ));
    }

    Grid::from_shape_vec(grid.dim(), tiles).map_err(|e| {
        invalid_parameter("grid", &format!("{:?}", grid.dim()), &e.to_string())
    })
}

/// Pixelate `image` with square tiles of `tile_size` pixels
///
/// The output covers only the whole tiles, so it may be smaller than the
/// input by up to `tile_size - 1` pixels on each axis.
///
/// # Errors
///
/// Returns `InvalidTileSize` if no whole tile fits into the image
pub fn pixelate(image: &RgbImage, tile_size: u32) -> Result<RgbImage> {
    let grid = tile(image, tile_size)?;
    let solid = solid_blocks(&grid)?;
    from_tiles(&solid)
}

/// Percents visited by the animation, first to last
///
/// Follows a half-open range from `start` towards `end` in increments of
/// `floor((end - start) / steps)`. The frame count is therefore
/// `ceil(|end - start| / |increment|)`, which is not always `steps`: flooring
/// widens a descending increment and narrows an ascending one, so
/// `100 -> 5` in 20 steps gives 19 frames and `5 -> 100` in 10 steps gives 11.
///
/// # Errors
///
/// Returns `InvalidParameter` if:
/// - `steps` is not positive
/// - The increment rounds to zero
/// - Any visited percent is not positive
pub fn sequence_percents(start: i32, end: i32, steps: i32) -> Result<Vec<i32>> {
    if steps <= 0 {
        return Err(invalid_parameter("steps", &steps, &"must be positive"));
    }

    let span = end
        .checked_sub(start)
        .ok_or_else(|| invalid_parameter("end", &end, &"percent span overflows"))?;
    let step = span.div_euclid(steps);
    if step == 0 {
        return Err(invalid_parameter(
            "steps",
            &steps,
            &format!("step between {start}% and {end}% rounds to zero"),
        ));
    }

    let mut percents = Vec::new();
    let mut current = start;
    while (step < 0 && current > end) || (step > 0 && current < end) {
        if current <= 0 {
            return Err(invalid_parameter(
                "percent",
                &current,
                &"every visited percent must be positive",
            ));
        }
        percents.push(current);
        current += step;
    }

    Ok(percents)
}

/// Tile size used for a frame at `percent`: `max(width, height) / percent`
///
/// # Errors
///
/// Returns `InvalidParameter` if `percent` is not positive
pub fn tile_size_for_percent(image: &RgbImage, percent: i32) -> Result<u32> {
    let percent = u32::try_from(percent)
        .ok()
        .filter(|&p| p > 0)
        .ok_or_else(|| invalid_parameter("percent", &percent, &"must be positive"))?;

    Ok(image.width().max(image.height()) / percent)
}

/// Pixelate `image` once per percent of [`sequence_percents`]
///
/// Frames are rendered in parallel and returned in sequence order.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or any frame's tile size
/// is zero or too large for the image
pub fn pixelate_sequence(
    image: &RgbImage,
    start: i32,
    end: i32,
    steps: i32,
    progress: Option<&ProgressReporter>,
) -> Result<Vec<RgbImage>> {
    let percents = sequence_percents(start, end, steps)?;
    let tile_sizes = percents
        .iter()
        .map(|&percent| tile_size_for_percent(image, percent))
        .collect::<Result<Vec<_>>>()?;
    debug!("Pixelation sequence tile sizes: {tile_sizes:?}");

    if let Some(pm) = progress {
        pm.start("frames", tile_sizes.len());
    }

    let frames = tile_sizes
        .par_iter()
        .map(|&tile_size| {
            let frame = pixelate(image, tile_size);
            if let Some(pm) = progress {
                pm.advance();
            }
            frame
        })
        .collect::<Result<Vec<_>>>();

    if let Some(pm) = progress {
        pm.finish();
    }

    frames
}
