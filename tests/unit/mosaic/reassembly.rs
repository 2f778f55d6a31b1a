//! Tests for composing tile grids back into rasters

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::MosaicError;
    use photomosaic::mosaic::{TileSource, from_references, from_tiles};
    use photomosaic::spatial::{Grid, tile};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory tile store that records the order of loads
    struct RecordingSource {
        tiles: HashMap<String, RgbImage>,
        loads: RefCell<Vec<String>>,
    }

    impl RecordingSource {
        fn new(tiles: Vec<(&str, RgbImage)>) -> Self {
            Self {
                tiles: tiles
                    .into_iter()
                    .map(|(id, tile)| (id.to_string(), tile))
                    .collect(),
                loads: RefCell::new(Vec::new()),
            }
        }
    }

    impl TileSource for RecordingSource {
        fn load(&self, identifier: &str) -> photomosaic::Result<RgbImage> {
            self.loads.borrow_mut().push(identifier.to_string());
            self.tiles
                .get(identifier)
                .cloned()
                .ok_or_else(|| MosaicError::TileLoadFailure {
                    identifier: identifier.to_string(),
                    path: identifier.into(),
                    source: image::ImageError::IoError(std::io::Error::from(
                        std::io::ErrorKind::NotFound,
                    )),
                })
        }
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 17 % 256) as u8, (y * 29 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    fn grid_of<T>(rows: usize, cols: usize, items: Vec<T>) -> Grid<T> {
        Grid::from_shape_vec((rows, cols), items).expect("shape matches item count")
    }

    // Tests tiling then reassembling unchanged tiles is lossless
    // Verified by swapping the x and y offsets when pasting
    #[test]
    fn test_round_trip_is_bit_exact() {
        let image = gradient(12, 8);
        let blocks = tile(&image, 4).expect("tiling should succeed");
        let tiles = blocks.map(|block| block.to_image());

        let rebuilt = from_tiles(&tiles).expect("reassembly should succeed");
        assert_eq!(rebuilt, image);
    }

    // Tests output size is the tile size times the grid shape
    // Verified by sizing the output from the grid shape alone
    #[test]
    fn test_from_tiles_output_dimensions() {
        let tiles = grid_of(
            2,
            3,
            (0..6u8)
                .map(|i| RgbImage::from_pixel(5, 2, Rgb([i, i, i])))
                .collect(),
        );

        let output = from_tiles(&tiles).expect("reassembly should succeed");
        assert_eq!(output.dimensions(), (15, 4));
        assert_eq!(output.get_pixel(14, 3), &Rgb([5, 5, 5]));
        assert_eq!(output.get_pixel(5, 0), &Rgb([1, 1, 1]));
        assert_eq!(output.get_pixel(0, 2), &Rgb([3, 3, 3]));
    }

    // Tests mismatched tiles are reported with their position
    // Verified by skipping the dimension check
    #[test]
    fn test_from_tiles_rejects_inconsistent_tiles() {
        let mut items = vec![RgbImage::new(3, 3); 4];
        if let Some(tile) = items.get_mut(3) {
            *tile = RgbImage::new(3, 2);
        }
        let tiles = grid_of(2, 2, items);

        assert!(matches!(
            from_tiles(&tiles),
            Err(MosaicError::InconsistentTileSize {
                row: 1,
                col: 1,
                expected: (3, 3),
                found: (3, 2)
            })
        ));
    }

    // Tests an empty grid is rejected
    // Verified by allocating a zero-sized output instead
    #[test]
    fn test_from_tiles_rejects_empty_grid() {
        let tiles: Grid<RgbImage> = grid_of(0, 0, Vec::new());
        assert!(matches!(
            from_tiles(&tiles),
            Err(MosaicError::InvalidParameter { parameter: "grid", .. })
        ));
    }

    // Tests every referenced tile is loaded once, first tile first, row-major
    // Verified by loading the first tile twice
    #[test]
    fn test_from_references_loads_each_tile_once_in_order() {
        let source = RecordingSource::new(vec![
            ("red", RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]))),
            ("blue", RgbImage::from_pixel(2, 2, Rgb([0, 0, 255]))),
        ]);
        let plan = grid_of(2, 2, vec!["red", "blue", "blue", "red"]);

        let output = from_references(&plan, &source).expect("reassembly should succeed");

        assert_eq!(output.dimensions(), (4, 4));
        assert_eq!(output.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(output.get_pixel(3, 1), &Rgb([0, 0, 255]));
        assert_eq!(output.get_pixel(1, 3), &Rgb([0, 0, 255]));
        assert_eq!(output.get_pixel(3, 3), &Rgb([255, 0, 0]));
        assert_eq!(*source.loads.borrow(), vec!["red", "blue", "blue", "red"]);
    }

    // Tests a missing tile aborts the whole reassembly
    // Verified by substituting a blank tile for missing ones
    #[test]
    fn test_from_references_propagates_load_failure() {
        let source = RecordingSource::new(vec![("a", RgbImage::new(2, 2))]);
        let plan = grid_of(1, 2, vec!["a".to_string(), "missing".to_string()]);

        assert!(matches!(
            from_references(&plan, &source),
            Err(MosaicError::TileLoadFailure { ref identifier, .. }) if identifier == "missing"
        ));
    }

    // Tests thumbnails of differing size are rejected
    // Verified by skipping the dimension check for loaded tiles
    #[test]
    fn test_from_references_rejects_inconsistent_tiles() {
        let source = RecordingSource::new(vec![
            ("big", RgbImage::new(4, 4)),
            ("small", RgbImage::new(2, 2)),
        ]);
        let plan = grid_of(1, 2, vec!["big", "small"]);

        assert!(matches!(
            from_references(&plan, &source),
            Err(MosaicError::InconsistentTileSize {
                row: 0,
                col: 1,
                ..
            })
        ));
    }
}
