//! Partitioning of a raster into a row-major grid of square blocks
//!
//! Only whole tiles are produced. The strip of pixels on the right and bottom
//! edges that cannot hold a full tile is dropped, never padded.

use crate::io::error::{MosaicError, Result};
use image::{Rgb, RgbImage, imageops};
use ndarray::Array2;
use tracing::debug;

/// Rectangular, row-major grid of equally sized tiles
pub type Grid<T> = Array2<T>;

/// Half-open pixel rectangle `[left, right) x [top, bottom)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    /// First column inside the rectangle
    pub left: u32,
    /// First row inside the rectangle
    pub top: u32,
    /// First column past the rectangle
    pub right: u32,
    /// First row past the rectangle
    pub bottom: u32,
}

impl PixelBounds {
    /// Bounds of the square tile at the given grid position
    pub const fn for_tile(row: u32, col: u32, tile_size: u32) -> Self {
        Self {
            left: col * tile_size,
            top: row * tile_size,
            right: (col + 1) * tile_size,
            bottom: (row + 1) * tile_size,
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Read-only view of one tile of a raster
#[derive(Clone, Copy, Debug)]
pub struct Block<'a> {
    source: &'a RgbImage,
    row: usize,
    col: usize,
    bounds: PixelBounds,
}

impl<'a> Block<'a> {
    /// Create a view over `bounds` of `source`
    ///
    /// Zero-area bounds are accepted; reducing such a block fails later.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the bounds are inverted or extend past
    /// the edges of `source`
    pub fn new(source: &'a RgbImage, row: usize, col: usize, bounds: PixelBounds) -> Result<Self> {
        let inverted = bounds.left > bounds.right || bounds.top > bounds.bottom;
        if inverted || bounds.right > source.width() || bounds.bottom > source.height() {
            return Err(crate::io::error::invalid_parameter(
                "bounds",
                &format!("{bounds:?}"),
                &format!(
                    "must lie within the {}x{} source image",
                    source.width(),
                    source.height()
                ),
            ));
        }

        Ok(Self {
            source,
            row,
            col,
            bounds,
        })
    }

    /// Grid row of this block
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Grid column of this block
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Pixel rectangle covered by this block
    pub const fn bounds(&self) -> PixelBounds {
        self.bounds
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u64 {
        self.bounds.width() as u64 * self.bounds.height() as u64
    }

    /// Iterate the covered pixels in row-major order
    pub fn pixels(self) -> impl Iterator<Item = &'a Rgb<u8>> + 'a {
        let source = self.source;
        let PixelBounds {
            left,
            top,
            right,
            bottom,
        } = self.bounds;
        (top..bottom)
            .flat_map(move |y| (left..right).filter_map(move |x| source.get_pixel_checked(x, y)))
    }

    /// Copy the covered pixels into a new owned raster
    pub fn to_image(&self) -> RgbImage {
        imageops::crop_imm(
            self.source,
            self.bounds.left,
            self.bounds.top,
            self.width(),
            self.height(),
        )
        .to_image()
    }
}

/// Number of whole tiles that fit along each axis, as `(rows, cols)`
pub const fn grid_dimensions(width: u32, height: u32, tile_size: u32) -> (u32, u32) {
    if tile_size == 0 {
        return (0, 0);
    }
    (height / tile_size, width / tile_size)
}

/// Split `image` into a grid of `tile_size` square blocks
///
/// The grid has `floor(height / tile_size)` rows and
/// `floor(width / tile_size)` columns.
///
/// # Errors
///
/// Returns `InvalidTileSize` if `tile_size` is zero or larger than either
/// image dimension, so that no complete tile fits
pub fn tile(image: &RgbImage, tile_size: u32) -> Result<Grid<Block<'_>>> {
    let (width, height) = image.dimensions();
    let (rows, cols) = grid_dimensions(width, height, tile_size);

    if rows == 0 || cols == 0 {
        return Err(MosaicError::InvalidTileSize {
            tile_size,
            width,
            height,
        });
    }

    debug!("Image has {cols} * {rows} squares of size {tile_size}");

    let mut blocks = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        for col in 0..cols {
            blocks.push(Block {
                source: image,
                row: row as usize,
                col: col as usize,
                bounds: PixelBounds::for_tile(row, col, tile_size),
            });
        }
    }

    Array2::from_shape_vec((rows as usize, cols as usize), blocks).map_err(|e| {
        crate::io::error::invalid_parameter("tile_size", &tile_size, &e.to_string())
    })
}
