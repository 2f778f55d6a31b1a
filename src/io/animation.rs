//! Animated GIF export of pixelation sequences

use crate::io::configuration::FINAL_FRAME_HOLD_FACTOR;
use crate::io::error::{MosaicError, Result};
use crate::io::image::create_parent_dir;
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Frame, RgbImage};
use std::path::Path;

/// Smallest canvas holding every raster, as `(width, height)`
pub fn canvas_size(rasters: &[RgbImage]) -> (u32, u32) {
    rasters.iter().fold((0, 0), |(width, height), raster| {
        (width.max(raster.width()), height.max(raster.height()))
    })
}

/// Stretch `raster` over the whole canvas with nearest-neighbour sampling
fn fit_to_canvas(raster: &RgbImage, (width, height): (u32, u32)) -> RgbImage {
    if raster.dimensions() == (width, height) {
        raster.clone()
    } else {
        imageops::resize(raster, width, height, FilterType::Nearest)
    }
}

/// Convert rasters into GIF frames, holding the last one longer
///
/// Every frame is scaled to [`canvas_size`], so no frame is clipped and none
/// leaves an uncovered strip.
pub fn build_frames(rasters: &[RgbImage], delay_ms: u32) -> Vec<Frame> {
    let canvas = canvas_size(rasters);
    let last = rasters.len().saturating_sub(1);
    rasters
        .iter()
        .enumerate()
        .map(|(i, raster)| {
            let delay = if i == last {
                delay_ms.saturating_mul(FINAL_FRAME_HOLD_FACTOR)
            } else {
                delay_ms
            };
            Frame::from_parts(
                DynamicImage::ImageRgb8(fit_to_canvas(raster, canvas)).into_rgba8(),
                0,
                0,
                image::Delay::from_numer_denom_ms(delay, 1),
            )
        })
        .collect()
}

/// Write `rasters` to `output_path` as an infinitely looping GIF
///
/// # Errors
///
/// Returns an error if:
/// - No frames were provided
/// - File system operations fail
/// - GIF encoding fails
pub fn export_gif<P: AsRef<Path>>(rasters: &[RgbImage], output_path: P, delay_ms: u32) -> Result<()> {
    let output_path = output_path.as_ref();

    if rasters.is_empty() {
        return Err(crate::io::error::invalid_parameter(
            "frames",
            &0,
            &"at least one frame is required",
        ));
    }

    create_parent_dir(output_path)?;

    let file = std::fs::File::create(output_path).map_err(|e| MosaicError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let export_error = |e: image::ImageError| MosaicError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    };

    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).map_err(export_error)?;
    encoder
        .encode_frames(build_frames(rasters, delay_ms))
        .map_err(export_error)?;

    Ok(())
}
