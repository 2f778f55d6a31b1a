//! Raster decoding, encoding and folder-backed thumbnail storage

use crate::io::configuration::SOURCE_IMAGE_EXTENSIONS;
use crate::io::error::{MosaicError, Result};
use crate::mosaic::reassembly::TileSource;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Decode an image file into an RGB raster
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Encode a raster to `path`, format chosen by extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_raster<P: AsRef<Path>>(raster: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    create_parent_dir(path)?;

    raster.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create the directory that will hold `path`
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created
pub fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Whether the path carries one of the recognised image extensions
pub fn is_source_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SOURCE_IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// List the image files directly inside `folder`, sorted by path
///
/// # Errors
///
/// Returns `FileSystem` if the folder cannot be read
pub fn list_source_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |e: std::io::Error| MosaicError::FileSystem {
        path: folder.to_path_buf(),
        operation: "list folder",
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_source_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Thumbnails stored as individual files under one folder
///
/// A tile identifier is the file name relative to the folder.
#[derive(Debug, Clone)]
pub struct FolderTileSource {
    folder: PathBuf,
}

impl FolderTileSource {
    /// Resolve identifiers against `folder`
    pub fn new<P: Into<PathBuf>>(folder: P) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Folder identifiers are resolved against
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Location of the tile named `identifier`
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        self.folder.join(identifier)
    }
}

impl TileSource for FolderTileSource {
    fn load(&self, identifier: &str) -> Result<RgbImage> {
        let path = self.resolve(identifier);
        match image::open(&path) {
            Ok(img) => Ok(img.to_rgb8()),
            Err(source) => Err(MosaicError::TileLoadFailure {
                identifier: identifier.to_string(),
                path,
                source,
            }),
        }
    }
}
