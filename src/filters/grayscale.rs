//! Grayscale conversion filter.
//!
//! Collapses a (height, width, channels) buffer into a single (height, width)
//! luminance plane.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - copied as-is
//! - **RGB**: (height, width, 3) - weighted sum of R, G, B
//! - **RGBA**: (height, width, 4) - weighted sum of R, G, B, alpha dropped
//!
//! The default weights are ITU-R BT.601, the same luma the classic
//! `BGR2GRAY` conversion uses, so equalization results line up with
//! other vision toolkits.

use ndarray::{Array2, ArrayView3, Axis, Zip};

use crate::error::{EditorError, Result};

/// ITU-R BT.601 luma coefficients
pub const LUMA_601_R: f32 = 0.299;
pub const LUMA_601_G: f32 = 0.587;
pub const LUMA_601_B: f32 = 0.114;

/// ITU-R BT.709 luminosity coefficients
pub const LUMA_709_R: f32 = 0.2126;
pub const LUMA_709_G: f32 = 0.7152;
pub const LUMA_709_B: f32 = 0.0722;

/// RGB channel weights for grayscale conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayscaleWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for GrayscaleWeights {
    fn default() -> Self {
        Self::bt601()
    }
}

impl GrayscaleWeights {
    /// BT.601 luma (default)
    pub fn bt601() -> Self {
        Self {
            r: LUMA_601_R,
            g: LUMA_601_G,
            b: LUMA_601_B,
        }
    }

    /// BT.709 luminosity
    pub fn bt709() -> Self {
        Self {
            r: LUMA_709_R,
            g: LUMA_709_G,
            b: LUMA_709_B,
        }
    }

    /// Custom weights, normalized so they sum to 1.0.
    pub fn custom(r: f32, g: f32, b: f32) -> Self {
        let sum = r + g + b;
        if sum.abs() < f32::EPSILON {
            return Self::default();
        }
        Self {
            r: r / sum,
            g: g / sum,
            b: b / sum,
        }
    }
}

/// Convert an image to a single luminance plane with BT.601 weights.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Grayscale plane of shape (height, width)
pub fn to_gray_u8(input: ArrayView3<u8>) -> Result<Array2<u8>> {
    to_gray_weighted_u8(input, GrayscaleWeights::default())
}

/// Convert an image to a single luminance plane with custom weights.
pub fn to_gray_weighted_u8(input: ArrayView3<u8>, weights: GrayscaleWeights) -> Result<Array2<u8>> {
    let (height, width, channels) = input.dim();
    if height == 0 || width == 0 {
        return Err(EditorError::EmptyImage);
    }

    match channels {
        1 => Ok(input.index_axis(Axis(2), 0).to_owned()),
        3 | 4 => {
            let mut output = Array2::<u8>::zeros((height, width));
            Zip::indexed(&mut output).par_for_each(|(y, x), out| {
                let r = input[[y, x, 0]] as f32;
                let g = input[[y, x, 1]] as f32;
                let b = input[[y, x, 2]] as f32;
                *out = (weights.r * r + weights.g * g + weights.b * b)
                    .round()
                    .clamp(0.0, 255.0) as u8;
            });
            Ok(output)
        }
        other => Err(EditorError::ChannelOutOfRange {
            channel: 2,
            channels: other,
        }),
    }
}
