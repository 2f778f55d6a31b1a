//! Matching constants and runtime configuration defaults

// Color distances are Euclidean over (R, G, B) with 8-bit channels,
// so every distance lies in 0..=MAX_RGB_DISTANCE.
/// Largest possible RGB distance, `sqrt(3 * 255^2)`
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_064;

/// Distance at or below which a candidate is accepted without further search
pub const MATCH_THRESHOLD: f64 = 4.0;

/// Starting best-distance bound, strictly above any reachable distance
pub const INITIAL_DISTANCE_BOUND: f64 = MAX_RGB_DISTANCE + 1.0;

/// Default edge length of square tiles in pixels
pub const DEFAULT_TILE_SIZE: u32 = 50;

// Animation defaults, expressed as percent divisors of the longer image side
/// Percent the pixelation sequence starts at
pub const DEFAULT_START_PERCENT: i32 = 100;
/// Percent the pixelation sequence stops before
pub const DEFAULT_END_PERCENT: i32 = 5;
/// Number of steps between start and end percent
pub const DEFAULT_STEPS: i32 = 10;

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Multiplier applied to the delay of the last frame
pub const FINAL_FRAME_HOLD_FACTOR: u32 = 5;

// Cache and thumbnail settings
/// Default edge length of square thumbnails
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 300;
/// Default color cache document
pub const DEFAULT_CACHE_FILE: &str = "cache.json";
/// Default folder holding thumbnails
pub const DEFAULT_THUMBNAIL_FOLDER: &str = "img_cache";
/// Filename prefix given to generated thumbnails
pub const THUMBNAIL_PREFIX: &str = "thumb_";
/// File extensions picked up when scanning image folders
pub const SOURCE_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Fixed seed for reproducible fallback selection
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix added to pixelated output filenames
pub const PIXELATED_SUFFIX: &str = "_pixelated";
/// Suffix added to photomosaic output filenames
pub const MOSAIC_SUFFIX: &str = "_mosaic";
/// Suffix added to animated output filenames
pub const ANIMATED_SUFFIX: &str = "_animated";

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Match Index tuning, in RGB Euclidean distance units (0..=441)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Accept the first candidate whose distance is at or below this value
    pub threshold: f64,
    /// Best distance assumed before any candidate is examined
    ///
    /// Candidates must beat this bound to replace the random fallback key.
    pub initial_bound: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: MATCH_THRESHOLD,
            initial_bound: INITIAL_DISTANCE_BOUND,
        }
    }
}

impl MatchConfig {
    /// Config with a custom early-exit threshold and the default bound
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}
