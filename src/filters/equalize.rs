//! Global histogram equalization.
//!
//! Builds a lookup table from the cumulative histogram so the output
//! intensities spread over the full 0-255 range.

use ndarray::{Array2, ArrayView2};

use crate::error::{EditorError, Result};
use crate::histogram::histogram_plane_u8;

/// Equalization lookup table for a 256-bin histogram.
///
/// The first occupied bin maps to 0 and the remaining mass is scaled to 255.
/// A histogram with a single occupied bin maps that value to itself.
pub fn equalization_lut(hist: &[u32; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let total: u64 = hist.iter().map(|&c| c as u64).sum();

    let Some(first) = hist.iter().position(|&c| c > 0) else {
        return lut;
    };
    if hist[first] as u64 == total {
        return [first as u8; 256];
    }

    let scale = 255.0 / (total - hist[first] as u64) as f64;
    let mut sum = 0u64;
    for i in (first + 1)..256 {
        sum += hist[i] as u64;
        lut[i] = (sum as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Apply global histogram equalization to a grayscale plane.
///
/// # Arguments
/// * `input` - Grayscale plane (height, width)
///
/// # Returns
/// Equalized plane of the same shape
pub fn equalize_hist_u8(input: ArrayView2<u8>) -> Result<Array2<u8>> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return Err(EditorError::EmptyImage);
    }

    let hist = histogram_plane_u8(input);
    let lut = equalization_lut(&hist);
    Ok(input.mapv(|v| lut[v as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_levels_stretch_to_extremes() {
        let mut img = Array2::<u8>::from_elem((2, 2), 100);
        img[[1, 1]] = 120;

        let result = equalize_hist_u8(img.view()).unwrap();

        assert_eq!(result[[0, 0]], 0);
        assert_eq!(result[[1, 1]], 255);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let img = Array2::<u8>::from_elem((3, 3), 42);
        let result = equalize_hist_u8(img.view()).unwrap();
        assert!(result.iter().all(|&v| v == 42));
    }

    #[test]
    fn test_lut_is_monotonic() {
        let img = Array2::from_shape_fn((16, 16), |(y, x)| ((y * 16 + x) / 3 + 60) as u8);
        let hist = histogram_plane_u8(img.view());
        let lut = equalization_lut(&hist);
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1]);
        }
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_low_contrast_gets_full_range() {
        let img = Array2::from_shape_fn((8, 8), |(y, x)| (100 + (y * 8 + x) % 20) as u8);
        let result = equalize_hist_u8(img.view()).unwrap();
        let min = *result.iter().min().unwrap();
        let max = *result.iter().max().unwrap();
        assert_eq!(min, 0);
        assert_eq!(max, 255);
    }
}
