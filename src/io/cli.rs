//! Command-line interface for pixelation, photomosaics and cache maintenance

use crate::io::animation::export_gif;
use crate::io::cache::ColorCache;
use crate::io::configuration::{
    ANIMATED_SUFFIX, DEFAULT_CACHE_FILE, DEFAULT_END_PERCENT, DEFAULT_SEED, DEFAULT_START_PERCENT,
    DEFAULT_STEPS, DEFAULT_THUMBNAIL_FOLDER, DEFAULT_THUMBNAIL_SIZE, DEFAULT_TILE_SIZE,
    GIF_FRAME_DELAY_MS, MATCH_THRESHOLD, MOSAIC_SUFFIX, MatchConfig, PIXELATED_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{FolderTileSource, load_raster, save_raster};
use crate::io::progress::ProgressReporter;
use crate::io::thumbnails::create_thumbnails;
use crate::mosaic::{MatchIndex, build_mosaic, pixelate, pixelate_sequence};
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Pixelate images or rebuild them as photomosaics of thumbnails"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the tool
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace every tile of an image with its average color
    Pixelate {
        /// Image to convert
        image: PathBuf,

        /// Edge length of the square pixels
        #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
        size: u32,

        /// Output path (defaults to <stem>_pixelated_<size>.<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a GIF that pixelates an image more coarsely on every frame
    Animate {
        /// Image to convert
        image: PathBuf,

        /// Starting divisor percent of the longer image side
        #[arg(short, long, default_value_t = DEFAULT_START_PERCENT, allow_negative_numbers = true)]
        start: i32,

        /// Final divisor percent, excluded from the sequence
        #[arg(short, long, default_value_t = DEFAULT_END_PERCENT, allow_negative_numbers = true)]
        end: i32,

        /// Number of steps between start and end percent
        #[arg(short = 'n', long = "number-of-steps", default_value_t = DEFAULT_STEPS)]
        steps: i32,

        /// Delay between frames in milliseconds
        #[arg(short, long, default_value_t = GIF_FRAME_DELAY_MS)]
        delay: u32,

        /// Output path (defaults to <stem>_animated.gif next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild an image from the closest-colored cached thumbnails
    Mosaic {
        /// Image to convert
        image: PathBuf,

        /// Folder holding the thumbnails named in the cache
        #[arg(default_value = DEFAULT_THUMBNAIL_FOLDER)]
        folder: PathBuf,

        /// Color cache document
        #[arg(short = 'i', long = "imagecache", default_value = DEFAULT_CACHE_FILE)]
        cache: PathBuf,

        /// Edge length of the source tiles each thumbnail replaces
        #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
        size: u32,

        /// Accept the first thumbnail within this RGB distance
        #[arg(short, long, default_value_t = MATCH_THRESHOLD)]
        threshold: f64,

        /// Seed for the fallback thumbnail choice
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output path (defaults to <stem>_mosaic_<size>.<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record the average color of every new thumbnail in a folder
    Cache {
        /// Folder of thumbnails to scan
        #[arg(default_value = DEFAULT_THUMBNAIL_FOLDER)]
        folder: PathBuf,

        /// Color cache document to update
        #[arg(short = 'i', long = "imagecache", default_value = DEFAULT_CACHE_FILE)]
        cache: PathBuf,
    },

    /// Create square thumbnails from a folder of photos
    Thumbnails {
        /// Folder of source photos
        folder: PathBuf,

        /// Edge length of the thumbnails
        #[arg(short, long, default_value_t = DEFAULT_THUMBNAIL_SIZE)]
        size: u32,

        /// Folder the thumbnails are written to
        #[arg(short, long, default_value = DEFAULT_THUMBNAIL_FOLDER)]
        output: PathBuf,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Executes the parsed command with optional progress display
pub struct CommandRunner {
    cli: Cli,
    progress: Option<ProgressReporter>,
}

impl CommandRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressReporter::new);
        Self { cli, progress }
    }

    /// Run the command and return the path of the main file it wrote
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read, a parameter is invalid
    /// or an output cannot be written
    pub fn run(&self) -> Result<PathBuf> {
        match &self.cli.command {
            Command::Pixelate {
                image,
                size,
                output,
            } => Self::run_pixelate(image, *size, output.as_deref()),
            Command::Animate {
                image,
                start,
                end,
                steps,
                delay,
                output,
            } => self.run_animate(image, (*start, *end, *steps), *delay, output.as_deref()),
            Command::Mosaic {
                image,
                folder,
                cache,
                size,
                threshold,
                seed,
                output,
            } => self.run_mosaic(
                image,
                folder,
                cache,
                *size,
                MatchConfig::with_threshold(*threshold),
                *seed,
                output.as_deref(),
            ),
            Command::Cache { folder, cache } => self.run_cache(folder, cache),
            Command::Thumbnails {
                folder,
                size,
                output,
            } => self.run_thumbnails(folder, *size, output),
        }
    }

    fn run_pixelate(image: &Path, size: u32, output: Option<&Path>) -> Result<PathBuf> {
        let source = load_raster(image)?;
        info!(
            "Pixelating {} ({}x{}) with {size} px squares",
            image.display(),
            source.width(),
            source.height()
        );

        let pixelated = pixelate(&source, size)?;
        let output_path = output.map_or_else(
            || derived_output_path(image, &format!("{PIXELATED_SUFFIX}_{size}"), None),
            Path::to_path_buf,
        );

        info!("Saving new image: {}", output_path.display());
        save_raster(&pixelated, &output_path)?;
        Ok(output_path)
    }

    fn run_animate(
        &self,
        image: &Path,
        (start, end, steps): (i32, i32, i32),
        delay: u32,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let source = load_raster(image)?;
        let frames = pixelate_sequence(&source, start, end, steps, self.progress.as_ref())?;
        info!("Rendered {} frames from {start}% to {end}%", frames.len());

        let output_path = output.map_or_else(
            || derived_output_path(image, ANIMATED_SUFFIX, Some("gif")),
            Path::to_path_buf,
        );

        info!("Saving new image: {}", output_path.display());
        export_gif(&frames, &output_path, delay)?;
        Ok(output_path)
    }

    fn run_mosaic(
        &self,
        image: &Path,
        folder: &Path,
        cache_path: &Path,
        size: u32,
        config: MatchConfig,
        seed: u64,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        if !folder.is_dir() {
            return Err(invalid_parameter(
                "folder",
                &folder.display(),
                &"image cache folder does not exist",
            ));
        }

        info!("Loading cache from file: {}", cache_path.display());
        let cache = ColorCache::load(cache_path)?;
        let index = MatchIndex::from_cache(&cache, config);
        let source = load_raster(image)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let tiles = FolderTileSource::new(folder);
        let mosaic = build_mosaic(
            &source,
            size,
            &index,
            &tiles,
            &mut rng,
            self.progress.as_ref(),
        )?;

        let output_path = output.map_or_else(
            || derived_output_path(image, &format!("{MOSAIC_SUFFIX}_{size}"), None),
            Path::to_path_buf,
        );

        info!("Saving new image: {}", output_path.display());
        save_raster(&mosaic, &output_path)?;
        Ok(output_path)
    }

    fn run_cache(&self, folder: &Path, cache_path: &Path) -> Result<PathBuf> {
        let mut cache = ColorCache::load_or_new(cache_path)?;
        let processed = cache.update_from_folder(folder, self.progress.as_ref())?;

        if processed > 0 {
            info!("Storing cache in: {}", cache_path.display());
            cache.save(cache_path)?;
        } else {
            info!("No changes processed - cache file not updated on disk");
        }

        Ok(cache_path.to_path_buf())
    }

    fn run_thumbnails(&self, folder: &Path, size: u32, output: &Path) -> Result<PathBuf> {
        let written = create_thumbnails(folder, size, output, self.progress.as_ref())?;
        info!("Created {} thumbnails in {}", written.len(), output.display());
        Ok(output.to_path_buf())
    }
}

/// Sibling of `input` named `<stem><suffix>.<extension>`
///
/// The input's own extension is kept when `extension` is `None`.
pub fn derived_output_path(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let extension = extension.map_or_else(
        || input.extension().unwrap_or_default().to_string_lossy(),
        std::borrow::Cow::Borrowed,
    );
    let output_name = if extension.is_empty() {
        format!("{stem}{suffix}")
    } else {
        format!("{stem}{suffix}.{extension}")
    };

    if let Some(parent) = input.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
