//! Tests for nearest-color lookup with early exit and random fallback

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::color::AverageColor;
    use photomosaic::io::cache::{CacheEntry, ColorCache};
    use photomosaic::io::configuration::{MATCH_THRESHOLD, MatchConfig};
    use photomosaic::mosaic::MatchIndex;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn entry(key: &str, r: u8, g: u8, b: u8) -> (String, AverageColor) {
        (key.to_string(), AverageColor::new(r, g, b))
    }

    fn cache_of(entries: &[(&str, [u8; 3])]) -> ColorCache {
        let mut cache = ColorCache::new();
        for (key, [r, g, b]) in entries {
            cache.insert(
                *key,
                CacheEntry {
                    rgb_avg: AverageColor::new(*r, *g, *b),
                    processed: "0".to_string(),
                },
            );
        }
        cache
    }

    // Tests an exact color match is returned
    // Verified by starting the scan from the second entry
    #[test]
    fn test_exact_match_is_found() {
        let index = MatchIndex::from_entries(
            vec![
                entry("red", 255, 0, 0),
                entry("green", 0, 255, 0),
                entry("grey", 120, 121, 122),
            ],
            MatchConfig::default(),
        );
        let mut rng = StdRng::seed_from_u64(7);

        let key = index
            .nearest_match(AverageColor::new(120, 121, 122), &mut rng)
            .expect("index is not empty");
        assert_eq!(key, "grey");
    }

    // Tests the first candidate within threshold wins over a later closer one
    // Verified by removing the early exit
    #[test]
    fn test_early_exit_returns_first_good_enough() {
        let index = MatchIndex::from_entries(
            vec![
                entry("far", 0, 0, 0),
                entry("near", 103, 100, 100),
                entry("nearest", 100, 100, 100),
            ],
            MatchConfig::default(),
        );
        let mut rng = StdRng::seed_from_u64(1);

        let key = index
            .nearest_match(AverageColor::new(100, 100, 100), &mut rng)
            .expect("index is not empty");
        assert_eq!(key, "near");
    }

    // Tests cache-built indexes scan keys in ascending order
    // Verified by scanning in reverse key order
    #[test]
    fn test_cache_index_scans_in_key_order() {
        let cache = cache_of(&[
            ("c_nearest", [100, 100, 100]),
            ("a_far", [0, 0, 0]),
            ("b_near", [100, 102, 103]),
        ]);
        let index = MatchIndex::from_cache(&cache, MatchConfig::default());
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            index.keys().collect::<Vec<_>>(),
            vec!["a_far", "b_near", "c_nearest"]
        );
        let key = index
            .nearest_match(AverageColor::new(100, 100, 100), &mut rng)
            .expect("index is not empty");
        assert_eq!(key, "b_near");
    }

    // Tests the global minimum is returned when nothing meets the threshold
    // Verified by returning the first improving candidate
    #[test]
    fn test_closest_candidate_without_early_exit() {
        let index = MatchIndex::from_entries(
            vec![
                entry("a", 0, 0, 0),
                entry("b", 90, 90, 90),
                entry("c", 200, 200, 200),
            ],
            MatchConfig::with_threshold(1.0),
        );
        let mut rng = StdRng::seed_from_u64(11);

        let key = index
            .nearest_match(AverageColor::new(110, 110, 110), &mut rng)
            .expect("index is not empty");
        assert_eq!(key, "b");
    }

    // Tests an empty index fails
    // Verified by returning an empty key
    #[test]
    fn test_empty_cache_is_an_error() {
        let index = MatchIndex::from_cache(&ColorCache::new(), MatchConfig::default());
        let mut rng = StdRng::seed_from_u64(0);

        assert!(index.is_empty());
        assert!(matches!(
            index.nearest_match(AverageColor::new(1, 2, 3), &mut rng),
            Err(MosaicError::EmptyCache)
        ));
    }

    // Tests the random fallback is used when no candidate beats the bound
    // Verified by always falling back to the first key
    #[test]
    fn test_fallback_is_seeded_and_uniform_over_keys() {
        let config = MatchConfig {
            threshold: MATCH_THRESHOLD,
            initial_bound: 0.0,
        };
        let index = MatchIndex::from_entries(
            vec![entry("a", 0, 0, 0), entry("b", 50, 50, 50), entry("c", 90, 0, 0)],
            config,
        );
        let target = AverageColor::new(255, 255, 255);

        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        let mut seen = HashSet::new();
        for _ in 0..60 {
            let a = index.nearest_match(target, &mut first).expect("not empty");
            let b = index.nearest_match(target, &mut second).expect("not empty");
            assert_eq!(a, b);
            seen.insert(a.to_string());
        }

        assert_eq!(seen.len(), 3, "all keys should be drawn eventually");
    }

    // Tests default thresholds come from configuration
    // Verified by changing the default bound
    #[test]
    fn test_index_reports_config() {
        let index = MatchIndex::from_entries(vec![entry("x", 1, 1, 1)], MatchConfig::default());
        assert_eq!(index.len(), 1);
        assert_eq!(index.config(), MatchConfig::default());
        assert!((index.config().threshold - MATCH_THRESHOLD).abs() < f64::EPSILON);
    }
}
