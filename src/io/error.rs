//! Error types for tiling, matching and reassembly operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Tile size is zero or too large to fit a single tile into the image
    InvalidTileSize {
        /// Requested edge length of a square tile in pixels
        tile_size: u32,
        /// Width of the image being tiled
        width: u32,
        /// Height of the image being tiled
        height: u32,
    },

    /// Color reduction was requested over a block without pixels
    EmptyBlock {
        /// Grid row of the block
        row: usize,
        /// Grid column of the block
        col: usize,
    },

    /// Nearest-color lookup against a cache without entries
    EmptyCache,

    /// A grid tile does not share the dimensions of the first tile
    InconsistentTileSize {
        /// Grid row of the offending tile
        row: usize,
        /// Grid column of the offending tile
        col: usize,
        /// Dimensions of the first tile (width, height)
        expected: (u32, u32),
        /// Dimensions of the offending tile (width, height)
        found: (u32, u32),
    },

    /// A referenced thumbnail could not be read or decoded
    TileLoadFailure {
        /// Identifier the tile was requested by
        identifier: String,
        /// Resolved location of the tile
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// The color cache document could not be parsed or written
    CacheFormat {
        /// Path of the cache document
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize {
                tile_size,
                width,
                height,
            } => {
                write!(
                    f,
                    "Invalid tile size {tile_size} for a {width}x{height} image"
                )
            }
            Self::EmptyBlock { row, col } => {
                write!(f, "Block at row {row}, column {col} contains no pixels")
            }
            Self::EmptyCache => write!(f, "Color cache contains no entries"),
            Self::InconsistentTileSize {
                row,
                col,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Tile at row {row}, column {col} is {}x{}, expected {}x{}",
                    found.0, found.1, expected.0, expected.1
                )
            }
            Self::TileLoadFailure {
                identifier,
                path,
                source,
            } => {
                write!(
                    f,
                    "Failed to load tile '{identifier}' from '{}': {source}",
                    path.display()
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::CacheFormat { path, source } => {
                write!(f, "Invalid color cache '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileLoadFailure { source, .. }
            | Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::CacheFormat { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        Self::CacheFormat {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
