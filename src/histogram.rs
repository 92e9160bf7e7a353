//! 256-bin intensity histograms over the range [0, 256).

use ndarray::{Array2, ArrayView2, ArrayViewD, Axis};

use crate::error::{EditorError, Result};

pub const BINS: usize = 256;

/// Histogram of a single grayscale plane.
pub fn histogram_plane_u8(input: ArrayView2<u8>) -> [u32; BINS] {
    let mut hist = [0u32; BINS];
    for &v in input.iter() {
        hist[v as usize] += 1;
    }
    hist
}

/// Histogram of every sample in the buffer, all channels pooled.
pub fn flattened_histogram(input: ArrayViewD<u8>) -> [u32; BINS] {
    let mut hist = [0u32; BINS];
    for &v in input.iter() {
        hist[v as usize] += 1;
    }
    hist
}

/// Histogram of one channel of a 2D plane or 3D (height, width, channels) image.
///
/// A 2D plane only has channel 0.
pub fn channel_histogram(input: ArrayViewD<u8>, channel: usize) -> Result<[u32; BINS]> {
    match input.ndim() {
        2 => {
            if channel != 0 {
                return Err(EditorError::ChannelOutOfRange { channel, channels: 1 });
            }
            Ok(flattened_histogram(input))
        }
        3 => {
            let channels = input.len_of(Axis(2));
            if channel >= channels {
                return Err(EditorError::ChannelOutOfRange { channel, channels });
            }
            Ok(flattened_histogram(input.index_axis(Axis(2), channel)))
        }
        actual => Err(EditorError::UnsupportedRank {
            expected: "2 or 3",
            actual,
        }),
    }
}

/// Per-channel histograms stacked as columns.
///
/// # Returns
/// Array of shape (256, channels.len()) with bin counts as f32
pub fn calc_hist(input: ArrayViewD<u8>, channels: &[usize]) -> Result<Array2<f32>> {
    let mut output = Array2::<f32>::zeros((BINS, channels.len()));
    for (col, &channel) in channels.iter().enumerate() {
        let hist = channel_histogram(input.view(), channel)?;
        for (bin, &count) in hist.iter().enumerate() {
            output[[bin, col]] = count as f32;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    #[test]
    fn test_plane_counts() {
        let img = Array2::from_shape_vec((2, 2), vec![0u8, 0, 255, 7]).unwrap();
        let hist = histogram_plane_u8(img.view());
        assert_eq!(hist[0], 2);
        assert_eq!(hist[7], 1);
        assert_eq!(hist[255], 1);
        assert_eq!(hist.iter().sum::<u32>(), 4);
    }

    #[test]
    fn test_channel_selection() {
        let mut img = Array3::<u8>::zeros((2, 2, 3));
        img.index_axis_mut(Axis(2), 1).fill(9);

        let hist = channel_histogram(img.view().into_dyn(), 1).unwrap();
        assert_eq!(hist[9], 4);

        let flat = flattened_histogram(img.view().into_dyn());
        assert_eq!(flat[0], 8);
        assert_eq!(flat[9], 4);
    }

    #[test]
    fn test_calc_hist_shape() {
        let img = Array3::<u8>::from_elem((4, 4, 3), 3);
        let hist = calc_hist(img.view().into_dyn(), &[0, 1, 2]).unwrap();
        assert_eq!(hist.dim(), (256, 3));
        assert_eq!(hist[[3, 2]], 16.0);
    }

    #[test]
    fn test_missing_channel_is_error() {
        let img = Array2::<u8>::zeros((4, 4));
        let err = calc_hist(img.view().into_dyn(), &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, EditorError::ChannelOutOfRange { channel: 1, channels: 1 }));
    }
}
