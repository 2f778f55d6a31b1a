//! Square thumbnail generation for the mosaic candidate folder

use crate::io::configuration::THUMBNAIL_PREFIX;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{list_source_images, load_raster, save_raster};
use crate::io::progress::ProgressReporter;
use image::RgbImage;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Scale `image` to cover a `size x size` square, then crop the centre
///
/// # Errors
///
/// Returns `InvalidParameter` if `size` is zero
pub fn square_thumbnail(image: &RgbImage, size: u32) -> Result<RgbImage> {
    if size == 0 {
        return Err(invalid_parameter("size", &size, &"must be positive"));
    }

    let dynamic = image::DynamicImage::ImageRgb8(image.clone());
    Ok(dynamic
        .resize_to_fill(size, size, FilterType::Lanczos3)
        .into_rgb8())
}

/// File name given to the thumbnail of `source`: `thumb_<stem>.<ext>`
pub fn thumbnail_name(source: &Path) -> String {
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    match source.extension() {
        Some(ext) => format!("{THUMBNAIL_PREFIX}{stem}.{}", ext.to_string_lossy()),
        None => format!("{THUMBNAIL_PREFIX}{stem}"),
    }
}

/// Write a square thumbnail of `source` into `folder`
///
/// # Errors
///
/// Returns an error if the source cannot be decoded or the thumbnail cannot
/// be written
pub fn create_thumbnail(source: &Path, size: u32, folder: &Path) -> Result<PathBuf> {
    let raster = load_raster(source)?;
    let thumb = square_thumbnail(&raster, size)?;

    let output = folder.join(thumbnail_name(source));
    debug!("Saving thumbnail {}", output.display());
    save_raster(&thumb, &output)?;

    Ok(output)
}

/// Create thumbnails for every image in `source_folder`
///
/// Returns the paths written, in source order.
///
/// # Errors
///
/// Returns the first error from listing, decoding or writing
pub fn create_thumbnails(
    source_folder: &Path,
    size: u32,
    output_folder: &Path,
    progress: Option<&ProgressReporter>,
) -> Result<Vec<PathBuf>> {
    let sources = list_source_images(source_folder)?;
    info!(
        "Found {} images in folder {}",
        sources.len(),
        source_folder.display()
    );

    if let Some(pm) = progress {
        pm.start("thumbnails", sources.len());
    }

    let mut written = Vec::with_capacity(sources.len());
    for source in &sources {
        written.push(create_thumbnail(source, size, output_folder)?);
        if let Some(pm) = progress {
            pm.advance();
        }
    }

    if let Some(pm) = progress {
        pm.finish();
    }

    Ok(written)
}
