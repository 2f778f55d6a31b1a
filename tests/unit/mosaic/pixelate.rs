//! Tests for solid-color pixelation and the animation percent sequence

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::MosaicError;
    use photomosaic::io::progress::ProgressReporter;
    use photomosaic::mosaic::pixelate::tile_size_for_percent;
    use photomosaic::mosaic::{pixelate, pixelate_sequence, sequence_percents, solid_blocks};
    use photomosaic::spatial::tile;

    fn quadrants() -> RgbImage {
        RgbImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
            (true, true) => Rgb([10, 20, 30]),
            (false, true) => Rgb([0, 0, if x == 2 { 1 } else { 2 }]),
            (true, false) => Rgb([255, 255, 255]),
            (false, false) => Rgb([9, 8, 7]),
        })
    }

    // Tests each tile is filled with its truncated average
    // Verified by filling tiles with their top-left pixel
    #[test]
    fn test_pixelate_fills_tiles_with_average() {
        let output = pixelate(&quadrants(), 2).expect("pixelation should succeed");

        assert_eq!(output.dimensions(), (4, 4));
        assert_eq!(output.get_pixel(1, 1), &Rgb([10, 20, 30]));
        assert_eq!(output.get_pixel(3, 0), &Rgb([0, 0, 1]));
        assert_eq!(output.get_pixel(0, 3), &Rgb([255, 255, 255]));
        assert_eq!(output.get_pixel(2, 2), &Rgb([9, 8, 7]));
    }

    // Tests the output covers only whole tiles
    // Verified by padding partial tiles into the output
    #[test]
    fn test_pixelate_drops_partial_tiles() {
        let image = RgbImage::from_pixel(5, 7, Rgb([1, 2, 3]));
        let output = pixelate(&image, 2).expect("pixelation should succeed");

        assert_eq!(output.dimensions(), (4, 6));
    }

    // Tests solid blocks keep block size and grid shape
    // Verified by creating one-pixel blocks
    #[test]
    fn test_solid_blocks_shape() {
        let image = quadrants();
        let grid = tile(&image, 2).expect("tiling should succeed");
        let solid = solid_blocks(&grid).expect("reduction should succeed");

        assert_eq!(solid.dim(), (2, 2));
        for block in &solid {
            assert_eq!(block.dimensions(), (2, 2));
        }
    }

    // Tests the reference 100 -> 5 in 10 steps sequence
    // Verified by including the end percent
    #[test]
    fn test_sequence_percents_reference_case() {
        let percents = sequence_percents(100, 5, 10).expect("parameters are valid");
        assert_eq!(percents, vec![100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
    }

    // Tests floor division decides the frame count, not the step count
    // Verified by truncating the increment toward zero
    #[test]
    fn test_sequence_percents_frame_count_follows_floor_division() {
        assert_eq!(sequence_percents(100, 5, 20).map(|p| p.len()).ok(), Some(19));
        assert_eq!(sequence_percents(5, 100, 10).map(|p| p.len()).ok(), Some(11));
        assert_eq!(
            sequence_percents(5, 100, 10).ok().and_then(|p| p.last().copied()),
            Some(95)
        );
    }

    // Tests degenerate sequences are rejected
    // Verified by looping forever on a zero increment
    #[test]
    fn test_sequence_percents_rejects_invalid_parameters() {
        assert!(sequence_percents(50, 50, 10).is_err());
        assert!(sequence_percents(100, 5, 0).is_err());
        assert!(matches!(
            sequence_percents(10, -10, 2),
            Err(MosaicError::InvalidParameter {
                parameter: "percent",
                ..
            })
        ));
    }

    // Tests lower percents give larger tiles
    // Verified by multiplying by percent instead of dividing
    #[test]
    fn test_tile_sizes_grow_as_percent_shrinks() {
        let image = RgbImage::new(1000, 500);
        let sizes: Vec<u32> = sequence_percents(100, 5, 10)
            .expect("parameters are valid")
            .into_iter()
            .map(|p| tile_size_for_percent(&image, p).expect("percent is positive"))
            .collect();

        assert_eq!(sizes, vec![10, 11, 12, 14, 16, 20, 25, 33, 50, 100]);
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert!(tile_size_for_percent(&image, 0).is_err());
    }

    // Tests one frame per percent, in order, each sized to whole tiles
    // Verified by collecting frames from an unordered parallel iterator
    #[test]
    fn test_pixelate_sequence_frames() {
        let image = RgbImage::from_fn(1000, 500, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));
        let progress = ProgressReporter::hidden();
        let frames = pixelate_sequence(&image, 100, 5, 10, Some(&progress))
            .expect("sequence should succeed");

        assert_eq!(frames.len(), 10);
        let dims: Vec<(u32, u32)> = frames.iter().map(RgbImage::dimensions).collect();
        assert_eq!(dims.first(), Some(&(1000, 500)));
        assert_eq!(dims.get(1), Some(&(990, 495)));
        assert_eq!(dims.get(7), Some(&(990, 495)));
        assert_eq!(dims.last(), Some(&(1000, 500)));
        assert_eq!(progress.position(), 10);
    }

    // Tests a percent above the longer side is a tile size error
    // Verified by clamping tile size to one pixel
    #[test]
    fn test_pixelate_sequence_rejects_zero_tile_size() {
        let image = RgbImage::new(50, 40);
        assert!(matches!(
            pixelate_sequence(&image, 100, 5, 10, None),
            Err(MosaicError::InvalidTileSize { tile_size: 0, .. })
        ));
    }
}
