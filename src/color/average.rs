//! Per-channel mean color of blocks and whole images

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::{Block, Grid};
use image::{Rgb, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Truncated per-channel mean of a set of RGB pixels
///
/// Serializes as a plain `[r, g, b]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AverageColor(pub [u8; 3]);

impl AverageColor {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Red channel
    pub const fn r(&self) -> u8 {
        self.0[0]
    }

    /// Green channel
    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    /// Blue channel
    pub const fn b(&self) -> u8 {
        self.0[2]
    }

    /// Channels as an `[r, g, b]` array
    pub const fn channels(&self) -> [u8; 3] {
        self.0
    }

    /// Convert to an `image` pixel
    pub const fn to_rgb(&self) -> Rgb<u8> {
        Rgb(self.0)
    }

    /// Mean of `pixels`, each channel floor-divided by the pixel count
    ///
    /// Returns `None` when `pixels` is empty.
    pub fn from_pixels<'p, I>(pixels: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'p Rgb<u8>>,
    {
        let mut r_sum = 0u64;
        let mut g_sum = 0u64;
        let mut b_sum = 0u64;
        let mut count = 0u64;

        for pixel in pixels {
            let Rgb([r, g, b]) = *pixel;
            r_sum += u64::from(r);
            g_sum += u64::from(g);
            b_sum += u64::from(b);
            count += 1;
        }

        if count == 0 {
            return None;
        }

        // Each quotient is at most 255 since every summand is
        Some(Self([
            (r_sum / count) as u8,
            (g_sum / count) as u8,
            (b_sum / count) as u8,
        ]))
    }

    /// Mean color over every pixel of `image`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the image has no pixels
    pub fn of_image(image: &RgbImage) -> Result<Self> {
        Self::from_pixels(image.pixels()).ok_or_else(|| {
            invalid_parameter(
                "image",
                &format!("{}x{}", image.width(), image.height()),
                &"image contains no pixels",
            )
        })
    }
}

impl From<AverageColor> for Rgb<u8> {
    fn from(color: AverageColor) -> Self {
        color.to_rgb()
    }
}

/// Reduce a block to its average color
///
/// # Errors
///
/// Returns `EmptyBlock` if the block covers no pixels
pub fn average_color(block: &Block<'_>) -> Result<AverageColor> {
    AverageColor::from_pixels(block.pixels()).ok_or(MosaicError::EmptyBlock {
        row: block.row(),
        col: block.col(),
    })
}

/// Reduce every block of a grid in parallel, keeping the grid shape
///
/// # Errors
///
/// Returns the first `EmptyBlock` encountered
pub fn reduce_grid(grid: &Grid<Block<'_>>) -> Result<Grid<AverageColor>> {
    let blocks: Vec<Block<'_>> = grid.iter().copied().collect();
    let colors = blocks
        .par_iter()
        .map(average_color)
        .collect::<Result<Vec<_>>>()?;

    Grid::from_shape_vec(grid.dim(), colors).map_err(|e| {
        invalid_parameter("grid", &format!("{:?}", grid.dim()), &e.to_string())
    })
}
