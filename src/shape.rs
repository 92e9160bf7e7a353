//! Dimension bookkeeping for buffers handed to shape-sensitive consumers.

use ndarray::{ArrayD, Axis, IxDyn};

use crate::error::{EditorError, Result};

/// Append a trailing channel axis.
///
/// With `new_axis` the array gains a length-1 trailing axis whatever its
/// rank. Otherwise it is reshaped to `shape + [channel]`, which keeps the
/// element count only when `channel == 1`. Ranks 2, 3 and 4 are accepted.
/// The data itself is never touched.
///
/// # Examples
/// ```
/// use image_editor::add_new_channel;
/// use ndarray::Array2;
///
/// let gray = Array2::<u8>::zeros((256, 256)).into_dyn();
/// let with_channel = add_new_channel(gray, 1, false).unwrap();
/// assert_eq!(with_channel.shape(), &[256, 256, 1]);
/// ```
pub fn add_new_channel<A: Clone>(img: ArrayD<A>, channel: usize, new_axis: bool) -> Result<ArrayD<A>> {
    if new_axis {
        let last = img.ndim();
        return Ok(img.insert_axis(Axis(last)));
    }

    let rank = img.ndim();
    if !(2..=4).contains(&rank) {
        return Err(EditorError::UnsupportedRank {
            expected: "2, 3 or 4",
            actual: rank,
        });
    }

    let from = img.shape().to_vec();
    let mut to = from.clone();
    to.push(channel);

    let standard = if img.is_standard_layout() {
        img
    } else {
        img.as_standard_layout().into_owned()
    };
    standard
        .into_shape_with_order(IxDyn(&to))
        .map_err(|_| EditorError::ShapeMismatch { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, Array4};

    #[test]
    fn test_new_axis_appends_one() {
        for shape in [vec![4, 5], vec![4, 5, 3], vec![2, 4, 5, 3], vec![1, 2, 3, 4, 5]] {
            let img = ArrayD::<u8>::zeros(IxDyn(&shape));
            let out = add_new_channel(img, 7, true).unwrap();
            let mut expected = shape.clone();
            expected.push(1);
            assert_eq!(out.shape(), expected.as_slice());
        }
    }

    #[test]
    fn test_reshape_per_rank() {
        let gray = Array2::<u8>::zeros((256, 256)).into_dyn();
        assert_eq!(add_new_channel(gray, 1, false).unwrap().shape(), &[256, 256, 1]);

        let color = Array3::<u8>::zeros((4, 4, 3)).into_dyn();
        assert_eq!(add_new_channel(color, 1, false).unwrap().shape(), &[4, 4, 3, 1]);

        let batch = Array4::<u8>::zeros((2, 4, 4, 3)).into_dyn();
        assert_eq!(add_new_channel(batch, 1, false).unwrap().shape(), &[2, 4, 4, 3, 1]);
    }

    #[test]
    fn test_data_is_untouched() {
        let img = Array2::from_shape_fn((2, 3), |(y, x)| (y * 3 + x) as u8);
        let out = add_new_channel(img.clone().into_dyn(), 1, false).unwrap();
        assert_eq!(out[[1, 2, 0]], img[[1, 2]]);
    }

    #[test]
    fn test_transposed_input_keeps_logical_order() {
        let img = Array2::from_shape_fn((2, 3), |(y, x)| (y * 3 + x) as u8);
        let transposed = img.reversed_axes().into_dyn();
        let out = add_new_channel(transposed, 1, false).unwrap();
        assert_eq!(out.shape(), &[3, 2, 1]);
        assert_eq!(out[[2, 1, 0]], 5);
    }

    #[test]
    fn test_channel_count_must_match_elements() {
        let gray = Array2::<u8>::zeros((4, 4)).into_dyn();
        let err = add_new_channel(gray, 3, false).unwrap_err();
        assert!(matches!(err, EditorError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_rank_one_rejected() {
        let flat = ArrayD::<u8>::zeros(IxDyn(&[16]));
        let err = add_new_channel(flat, 1, false).unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedRank { actual: 1, .. }));
    }
}
