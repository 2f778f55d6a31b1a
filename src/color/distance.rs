//! Euclidean color distance in RGB space

use crate::color::average::AverageColor;

/// Square-rooted Euclidean distance between two colors
///
/// Ranges from 0 for identical colors up to
/// [`MAX_RGB_DISTANCE`](crate::io::configuration::MAX_RGB_DISTANCE).
pub fn color_distance(a: AverageColor, b: AverageColor) -> f64 {
    let squared: i32 = a
        .channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(&x, &y)| {
            let diff = i32::from(x) - i32::from(y);
            diff * diff
        })
        .sum();

    f64::from(squared).sqrt()
}
