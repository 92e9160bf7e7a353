//! Linear contrast stretch and binary threshold on grayscale planes.

use ndarray::{Array2, ArrayView2};

use super::resize::{resize_gray_u8, Interpolation};
use crate::error::{EditorError, Result};

/// Side length used when [`contrast_stretch_u8`] is asked to rescale first.
pub const STRETCH_RESCALE_SIZE: usize = 150;

/// Scale, shift, take the absolute value and saturate to u8.
///
/// `out = saturate(round(|v * alpha + beta|))`
pub fn convert_scale_abs_u8(input: ArrayView2<u8>, alpha: f32, beta: f32) -> Array2<u8> {
    input.mapv(|v| (v as f32 * alpha + beta).abs().round().min(255.0) as u8)
}

/// Gain/bias contrast stretch.
///
/// The output is NOT thresholded: values are scaled by `gain`, shifted by
/// `bias` and saturated, so mid-tones stay mid-tones.
///
/// # Arguments
/// * `input` - Grayscale plane (height, width)
/// * `rescale` - Resize to 150x150 before stretching
/// * `gain` - Multiplier (1.10 by default in the editor)
/// * `bias` - Offset added after the multiply (20 by default in the editor)
pub fn contrast_stretch_u8(
    input: ArrayView2<u8>,
    rescale: bool,
    gain: f32,
    bias: f32,
) -> Result<Array2<u8>> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return Err(EditorError::EmptyImage);
    }

    if rescale {
        let resized = resize_gray_u8(
            input,
            STRETCH_RESCALE_SIZE,
            STRETCH_RESCALE_SIZE,
            Interpolation::Linear,
        )?;
        return Ok(convert_scale_abs_u8(resized.view(), gain, bias));
    }
    Ok(convert_scale_abs_u8(input, gain, bias))
}

/// Binary threshold: values strictly above `threshold` become 255, others 0.
pub fn threshold_binary_u8(input: ArrayView2<u8>, threshold: u8) -> Array2<u8> {
    input.mapv(|v| if v > threshold { 255 } else { 0 })
}
