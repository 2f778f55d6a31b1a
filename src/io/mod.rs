//! Input/output collaborators around the mosaic core

/// Animated GIF export of pixelation sequences
pub mod animation;
/// Persistent average-color cache of thumbnails
pub mod cache;
/// Command-line interface and command runner
pub mod cli;
/// Matching constants and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Raster file I/O and folder-backed thumbnail storage
pub mod image;
/// Terminal progress display
pub mod progress;
/// Square thumbnail generation
pub mod thumbnails;
