//! Resampling filters: area averaging and bilinear interpolation.
//!
//! Both run as two separable passes (horizontal, then vertical) over a
//! precomputed tap table per axis. Intermediate values stay in f32 and are
//! rounded once at the end.
//!
//! ## Supported Formats
//!
//! Any (height, width, channels) u8 buffer. 2D planes go through
//! [`resize_gray_u8`], which wraps them as single-channel images.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, Zip};

use crate::error::{EditorError, Result};

/// Resampling kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Average of the source area covered by each output pixel.
    /// Falls back to bilinear along an axis that is being enlarged.
    Area,
    /// Half-pixel centered bilinear sampling with clamped edges.
    #[default]
    Linear,
}

/// Source indices and weights contributing to one output index.
type Taps = Vec<Vec<(usize, f32)>>;

fn linear_taps(src: usize, dst: usize) -> Taps {
    let scale = src as f32 / dst as f32;
    (0..dst)
        .map(|d| {
            let pos = ((d as f32 + 0.5) * scale - 0.5).max(0.0);
            let i0 = (pos.floor() as usize).min(src - 1);
            let i1 = (i0 + 1).min(src - 1);
            if i0 == i1 {
                return vec![(i0, 1.0)];
            }
            let frac = (pos - i0 as f32).clamp(0.0, 1.0);
            vec![(i0, 1.0 - frac), (i1, frac)]
        })
        .collect()
}

fn area_taps(src: usize, dst: usize) -> Taps {
    if dst > src {
        return linear_taps(src, dst);
    }

    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|d| {
            let start = d as f64 * scale;
            let end = (start + scale).min(src as f64);
            let cell = end - start;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src);

            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-9).then(|| (s, (overlap / cell) as f32))
                })
                .collect()
        })
        .collect()
}

fn taps_for(interpolation: Interpolation, src: usize, dst: usize) -> Taps {
    match interpolation {
        Interpolation::Area => area_taps(src, dst),
        Interpolation::Linear => linear_taps(src, dst),
    }
}

/// Resize a multi-channel u8 image.
///
/// # Arguments
/// * `input` - Image of shape (height, width, channels)
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `interpolation` - Resampling kernel
///
/// # Returns
/// Image of shape (height, width, channels)
pub fn resize_u8(
    input: ArrayView3<u8>,
    width: usize,
    height: usize,
    interpolation: Interpolation,
) -> Result<Array3<u8>> {
    let (src_h, src_w, channels) = input.dim();
    if src_h == 0 || src_w == 0 {
        return Err(EditorError::EmptyImage);
    }
    if width == 0 || height == 0 {
        return Err(EditorError::InvalidScale { width, height });
    }

    let x_taps = taps_for(interpolation, src_w, width);
    let y_taps = taps_for(interpolation, src_h, height);

    // Horizontal pass
    let mut temp = Array3::<f32>::zeros((src_h, width, channels));
    Zip::indexed(&mut temp).par_for_each(|(y, x, c), out| {
        *out = x_taps[x]
            .iter()
            .map(|&(sx, w)| input[[y, sx, c]] as f32 * w)
            .sum();
    });

    // Vertical pass
    let mut output = Array3::<u8>::zeros((height, width, channels));
    Zip::indexed(&mut output).par_for_each(|(y, x, c), out| {
        let v: f32 = y_taps[y].iter().map(|&(sy, w)| temp[[sy, x, c]] * w).sum();
        *out = v.round().clamp(0.0, 255.0) as u8;
    });

    Ok(output)
}

/// Resize a 2D grayscale plane.
pub fn resize_gray_u8(
    input: ArrayView2<u8>,
    width: usize,
    height: usize,
    interpolation: Interpolation,
) -> Result<Array2<u8>> {
    let resized = resize_u8(input.insert_axis(Axis(2)), width, height, interpolation)?;
    Ok(resized.index_axis_move(Axis(2), 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(h: usize, w: usize) -> Array3<u8> {
        Array3::from_shape_fn((h, w, 3), |(y, x, c)| ((y * 7 + x * 3 + c * 11) % 256) as u8)
    }

    #[test]
    fn test_output_shape_is_height_width() {
        let img = gradient(480, 640);
        for interp in [Interpolation::Area, Interpolation::Linear] {
            let out = resize_u8(img.view(), 256, 128, interp).unwrap();
            assert_eq!(out.dim(), (128, 256, 3));
        }
    }

    #[test]
    fn test_same_size_is_identity() {
        let img = gradient(5, 7);
        for interp in [Interpolation::Area, Interpolation::Linear] {
            let out = resize_u8(img.view(), 7, 5, interp).unwrap();
            assert_eq!(out, img);
        }
    }

    #[test]
    fn test_area_halving_averages_blocks() {
        let mut img = Array3::<u8>::zeros((2, 2, 1));
        img[[0, 0, 0]] = 10;
        img[[0, 1, 0]] = 20;
        img[[1, 0, 0]] = 30;
        img[[1, 1, 0]] = 40;

        let out = resize_u8(img.view(), 1, 1, Interpolation::Area).unwrap();
        assert_eq!(out[[0, 0, 0]], 25);
    }

    #[test]
    fn test_area_fractional_weights_sum_to_one() {
        for (src, dst) in [(10, 3), (7, 4), (640, 256)] {
            for taps in area_taps(src, dst) {
                let sum: f32 = taps.iter().map(|&(_, w)| w).sum();
                assert!((sum - 1.0).abs() < 1e-4, "weights sum to {}", sum);
            }
        }
    }

    #[test]
    fn test_linear_upscale_constant_stays_constant() {
        let img = Array3::<u8>::from_elem((3, 3, 1), 77);
        let out = resize_u8(img.view(), 9, 6, Interpolation::Linear).unwrap();
        assert!(out.iter().all(|&v| v == 77));
    }

    #[test]
    fn test_linear_upscale_interpolates_between_neighbors() {
        let mut img = Array3::<u8>::zeros((1, 2, 1));
        img[[0, 1, 0]] = 200;

        let out = resize_u8(img.view(), 4, 1, Interpolation::Linear).unwrap();

        // src x = -0.25, 0.25, 0.75, 1.25 -> 0, 50, 150, 200
        assert_eq!(out[[0, 0, 0]], 0);
        assert_eq!(out[[0, 1, 0]], 50);
        assert_eq!(out[[0, 2, 0]], 150);
        assert_eq!(out[[0, 3, 0]], 200);
    }

    #[test]
    fn test_chained_resize_ends_at_last_size() {
        let img = gradient(31, 17);
        let a = resize_u8(img.view(), 100, 50, Interpolation::Linear).unwrap();
        let b = resize_u8(a.view(), 13, 29, Interpolation::Area).unwrap();
        assert_eq!(b.dim(), (29, 13, 3));
    }

    #[test]
    fn test_gray_plane_resize() {
        let plane = Array2::<u8>::from_elem((10, 20), 9);
        let out = resize_gray_u8(plane.view(), 5, 4, Interpolation::Area).unwrap();
        assert_eq!(out.dim(), (4, 5));
        assert!(out.iter().all(|&v| v == 9));
    }

    #[test]
    fn test_zero_target_is_rejected() {
        let img = gradient(4, 4);
        let err = resize_u8(img.view(), 0, 4, Interpolation::Area).unwrap_err();
        assert!(matches!(err, EditorError::InvalidScale { width: 0, height: 4 }));
    }
}
