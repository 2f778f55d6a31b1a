//! Nearest-color lookup over cached thumbnail colors
//!
//! The search is approximate. It walks the candidates in a fixed
//! order and stops at the first one whose distance is within the configured
//! threshold, even if a closer candidate appears later. A randomly drawn key
//! is held as the answer until some candidate beats the initial bound.

use crate::color::{AverageColor, color_distance};
use crate::io::cache::ColorCache;
use crate::io::configuration::MatchConfig;
use crate::io::error::{MosaicError, Result};
use rand::Rng;
use tracing::trace;

/// Read-only candidate set with a fixed scan order
#[derive(Debug, Clone)]
pub struct MatchIndex {
    entries: Vec<(String, AverageColor)>,
    config: MatchConfig,
}

impl MatchIndex {
    /// Index the entries of a color cache, scanned in ascending key order
    pub fn from_cache(cache: &ColorCache, config: MatchConfig) -> Self {
        Self::from_entries(
            cache
                .entries()
                .map(|(key, entry)| (key.to_string(), entry.rgb_avg)),
            config,
        )
    }

    /// Index arbitrary entries, scanned in the order given
    pub fn from_entries<I>(entries: I, config: MatchConfig) -> Self
    where
        I: IntoIterator<Item = (String, AverageColor)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            config,
        }
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no candidates
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active thresholds
    pub const fn config(&self) -> MatchConfig {
        self.config
    }

    /// Candidate keys in scan order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Find a candidate close to `target`
    ///
    /// Returns the first candidate within `config.threshold`, otherwise the
    /// closest candidate that beats `config.initial_bound`, otherwise a key
    /// drawn uniformly from `rng`. One draw is made per call.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCache` if the index holds no candidates
    pub fn nearest_match<R>(&self, target: AverageColor, rng: &mut R) -> Result<&str>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return Err(MosaicError::EmptyCache);
        }

        let fallback = rng.random_range(0..self.entries.len());
        let mut best_key = self
            .entries
            .get(fallback)
            .map(|(key, _)| key.as_str())
            .ok_or(MosaicError::EmptyCache)?;
        let mut best_distance = self.config.initial_bound;

        for (key, color) in &self.entries {
            let distance = color_distance(target, *color);
            if distance < best_distance {
                best_distance = distance;
                best_key = key.as_str();
            }
            if best_distance <= self.config.threshold {
                trace!("Found a close enough match: {best_distance:.2}, {best_key}");
                break;
            }
        }

        Ok(best_key)
    }
}
