//! Numeric helpers shared by preprocessing and correlation.

/// Maps a search-space coordinate of a padded kernel back to the top-left
/// corner of the template content in original image pixels.
#[inline]
pub(crate) fn search_to_original(pos: usize, padding: usize, scale: f32) -> usize {
    let value = (pos + padding) as f64 / f64::from(scale);
    value.round().max(0.0) as usize
}

/// Scales a pixel length, rounding to the nearest integer.
#[inline]
pub(crate) fn scaled_len(len: u32, factor: f64) -> u32 {
    (f64::from(len) * factor).round().max(0.0) as u32
}

/// Arithmetic mean of a slice, accumulated in `f64`. Empty slices yield 0.
pub(crate) fn mean_f64(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
    sum / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{mean_f64, scaled_len, search_to_original};

    #[test]
    fn search_to_original_undoes_downscale() {
        assert_eq!(search_to_original(24, 6, 0.5), 60);
        assert_eq!(search_to_original(2, 0, 1.0), 2);
        // 11 / 0.3 = 36.67
        assert_eq!(search_to_original(10, 1, 0.3), 37);
    }

    #[test]
    fn scaled_len_rounds_to_nearest() {
        assert_eq!(scaled_len(41, 0.5), 21);
        assert_eq!(scaled_len(40, 0.3), 12);
        assert_eq!(scaled_len(0, 0.5), 0);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean_f64(&[]), 0.0);
        assert!((mean_f64(&[1.0, 2.0, 3.0, 6.0]) - 3.0).abs() < 1e-12);
    }
}
