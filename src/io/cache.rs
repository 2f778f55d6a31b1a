//! Persistent average-color cache of thumbnail images
//!
//! Stored as a JSON document of the form
//! `{"store": {"<file name>": {"RGB_avg": [r, g, b], "processed": "<time>"}}}`.

use crate::color::AverageColor;
use crate::io::error::{MosaicError, Result};
use crate::io::image::{create_parent_dir, list_source_images, load_raster};
use crate::io::progress::ProgressReporter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Cached color of one thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Average color of the whole thumbnail
    #[serde(rename = "RGB_avg")]
    pub rgb_avg: AverageColor,
    /// When the thumbnail was processed
    pub processed: String,
}

impl CacheEntry {
    /// Entry stamped with the current time
    pub fn new(rgb_avg: AverageColor) -> Self {
        Self {
            rgb_avg,
            processed: processed_timestamp(),
        }
    }
}

/// Mapping from thumbnail file name to its cached color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCache {
    store: BTreeMap<String, CacheEntry>,
}

impl ColorCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a cache document
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cache
    /// document
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "read cache",
            source: e,
        })?;

        serde_json::from_str(&contents).map_err(|e| MosaicError::CacheFormat {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read a cache document, starting empty if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed
    pub fn load_or_new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!("Loading cache from file: {}", path.display());
            Self::load(path)
        } else {
            info!(
                "Image cache file does not exist, starting a new one: {}",
                path.display()
            );
            Ok(Self::new())
        }
    }

    /// Write the cache document, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if directories or the file cannot be written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        create_parent_dir(path)?;

        let contents = serde_json::to_string(self).map_err(|e| MosaicError::CacheFormat {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::write(path, contents).map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "write cache",
            source: e,
        })
    }

    /// Add or replace an entry, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, entry: CacheEntry) -> Option<CacheEntry> {
        self.store.insert(key.into(), entry)
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.store.get(key)
    }

    /// Whether `key` has been processed
    pub fn contains(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Number of cached thumbnails
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the cache holds no thumbnails
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Entries in ascending key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.store.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Add every image in `folder` that is not cached yet
    ///
    /// Files are visited in sorted order and keyed by file name. Existing
    /// entries are left untouched. Returns how many images were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be listed or an image cannot be
    /// decoded
    pub fn update_from_folder<P: AsRef<Path>>(
        &mut self,
        folder: P,
        progress: Option<&ProgressReporter>,
    ) -> Result<usize> {
        let folder = folder.as_ref();
        let images = list_source_images(folder)?;
        info!("Found {} images in folder {}", images.len(), folder.display());

        if let Some(pm) = progress {
            pm.start("caching", images.len());
        }

        let mut processed = 0;
        for path in &images {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };

            if !self.contains(&name) {
                debug!("Image {name} not found in cache, processing");
                let raster = load_raster(path)?;
                let color = AverageColor::of_image(&raster)?;
                self.insert(name, CacheEntry::new(color));
                processed += 1;
            }

            if let Some(pm) = progress {
                pm.advance();
            }
        }

        if let Some(pm) = progress {
            pm.finish();
        }

        info!(
            "Cache completed, processed {processed} files. Total files in cache {}",
            self.len()
        );
        Ok(processed)
    }
}

/// Seconds since the Unix epoch, as stored in `processed`
pub fn processed_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
        .to_string()
}
