//! Composition of a tile grid back into a single raster
//!
//! Tiles are pasted row by row. Each tile lands at the sum of the widths of
//! the tiles before it in its row and the heights of the rows above it. Every
//! tile must match the dimensions of the tile at `(0, 0)`.

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::Grid;
use image::{RgbImage, imageops};
use tracing::debug;

/// Storage that can produce a decoded tile for an identifier
pub trait TileSource {
    /// Load the tile named `identifier`
    ///
    /// # Errors
    ///
    /// Returns `TileLoadFailure` if the tile cannot be read or decoded
    fn load(&self, identifier: &str) -> Result<RgbImage>;
}

/// Raster sized to hold `rows x cols` tiles of `tile_dims`
fn allocate_output(rows: usize, cols: usize, tile_dims: (u32, u32)) -> Result<RgbImage> {
    let scale = |count: usize, unit: u32, parameter: &'static str| {
        u32::try_from(count)
            .ok()
            .and_then(|n| n.checked_mul(unit))
            .ok_or_else(|| invalid_parameter(parameter, &count, &"output dimension overflows u32"))
    };

    let width = scale(cols, tile_dims.0, "cols")?;
    let height = scale(rows, tile_dims.1, "rows")?;
    debug!("Calculated size of new image: {width} x {height}");

    Ok(RgbImage::new(width, height))
}

fn check_tile(tile: &RgbImage, expected: (u32, u32), row: usize, col: usize) -> Result<()> {
    let found = tile.dimensions();
    if found == expected {
        Ok(())
    } else {
        Err(MosaicError::InconsistentTileSize {
            row,
            col,
            expected,
            found,
        })
    }
}

fn empty_grid(dim: (usize, usize)) -> MosaicError {
    invalid_parameter(
        "grid",
        &format!("{}x{}", dim.0, dim.1),
        &"grid must contain at least one tile",
    )
}

/// Reassemble a grid of in-memory tiles
///
/// # Errors
///
/// Returns an error if:
/// - The grid is empty
/// - Any tile differs in size from the first tile
pub fn from_tiles(grid: &Grid<RgbImage>) -> Result<RgbImage> {
    let (rows, cols) = grid.dim();
    let first = grid.get((0, 0)).ok_or_else(|| empty_grid(grid.dim()))?;
    let tile_dims = first.dimensions();

    for ((row, col), tile) in grid.indexed_iter() {
        check_tile(tile, tile_dims, row, col)?;
    }

    let mut output = allocate_output(rows, cols, tile_dims)?;

    let mut y = 0u32;
    for grid_row in grid.outer_iter() {
        let mut x = 0u32;
        let mut row_height = 0u32;
        for tile in grid_row.iter() {
            imageops::replace(&mut output, tile, i64::from(x), i64::from(y));
            x += tile.width();
            row_height = tile.height();
        }
        y += row_height;
    }

    Ok(output)
}

/// Reassemble a grid of tile identifiers, loading each tile on demand
///
/// The first tile is loaded up front to size the output. Every other tile is
/// loaded, pasted and dropped in row-major order, so at most one tile is held
/// at a time besides the output.
///
/// # Errors
///
/// Returns an error if:
/// - The grid is empty
/// - A tile cannot be loaded
/// - Any tile differs in size from the first tile
pub fn from_references<T, S>(grid: &Grid<T>, source: &S) -> Result<RgbImage>
where
    T: AsRef<str>,
    S: TileSource + ?Sized,
{
    let (rows, cols) = grid.dim();
    let first_id = grid.get((0, 0)).ok_or_else(|| empty_grid(grid.dim()))?;
    let first = source.load(first_id.as_ref())?;
    let tile_dims = first.dimensions();

    let mut output = allocate_output(rows, cols, tile_dims)?;
    imageops::replace(&mut output, &first, 0, 0);
    drop(first);

    let mut y = 0u32;
    for (row, grid_row) in grid.outer_iter().enumerate() {
        let mut x = 0u32;
        let mut row_height = tile_dims.1;
        for (col, identifier) in grid_row.iter().enumerate() {
            if row == 0 && col == 0 {
                x += tile_dims.0;
                continue;
            }

            let tile = source.load(identifier.as_ref())?;
            check_tile(&tile, tile_dims, row, col)?;
            imageops::replace(&mut output, &tile, i64::from(x), i64::from(y));
            x += tile.width();
            row_height = tile.height();
        }
        y += row_height;
    }

    Ok(output)
}
