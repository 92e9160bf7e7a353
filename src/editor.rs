//! The single-image editor.
//!
//! [`ImageEditor`] decodes one file into an (height, width, 3) RGB buffer and
//! derives grayscale, equalized and contrast-stretched copies from it. The
//! decoded original is never modified.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use ndarray::{Array2, Array3, ArrayD, ArrayView3, ArrayViewD, Axis, Ix2, Ix3};

use crate::config::EditorConfig;
use crate::display::{squeeze_trailing, SystemViewer, Viewer};
use crate::error::{EditorError, Result};
use crate::filters::clahe::clahe_u8;
use crate::filters::contrast::{contrast_stretch_u8, threshold_binary_u8};
use crate::filters::equalize::equalize_hist_u8;
use crate::filters::grayscale::to_gray_u8;
use crate::filters::resize::{resize_gray_u8, resize_u8, Interpolation};
use crate::histogram::{calc_hist, flattened_histogram};
use crate::plot::{render_bars, render_lines};

/// Target size of a resize, as (width, height).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scale {
    pub width: usize,
    pub height: usize,
}

impl Scale {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let scale = Self { width, height };
        scale.validate()?;
        Ok(scale)
    }

    fn validate(self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EditorError::InvalidScale {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Edit applied by [`ImageEditor::edit_img_array`] after grayscale + resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditMethod {
    /// Grayscale, resized, nothing else (`gray`).
    Gray,
    /// Global histogram equalization (`equalizationHist`).
    GlobalEqualization,
    /// CLAHE (`clahe`).
    AdaptiveEqualization,
    /// Gain/bias stretch (`binary`). Despite the legacy name this does not
    /// binarize; see [`EditMethod::Threshold`] for that.
    ContrastStretch,
    /// Two-level threshold (`threshold`).
    Threshold,
}

impl EditMethod {
    pub const ALL: [EditMethod; 5] = [
        EditMethod::Gray,
        EditMethod::GlobalEqualization,
        EditMethod::AdaptiveEqualization,
        EditMethod::ContrastStretch,
        EditMethod::Threshold,
    ];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            EditMethod::Gray => "gray",
            EditMethod::GlobalEqualization => "equalizationHist",
            EditMethod::AdaptiveEqualization => "clahe",
            EditMethod::ContrastStretch => "binary",
            EditMethod::Threshold => "threshold",
        }
    }
}

impl fmt::Display for EditMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditMethod {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| EditorError::UnknownMethod(s.to_string()))
    }
}

/// Whether a histogram describes the loaded color image or an edited plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HistogramStage {
    /// Channel 0 only.
    #[default]
    PreEdit,
    /// Channels 0, 1 and 2.
    PostEdit,
}

impl HistogramStage {
    pub fn channels(self) -> &'static [usize] {
        match self {
            HistogramStage::PreEdit => &[0],
            HistogramStage::PostEdit => &[0, 1, 2],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            HistogramStage::PreEdit => "Color Image Histogram",
            HistogramStage::PostEdit => "Black and White Image",
        }
    }
}

/// Holds one decoded image and produces edited copies of it.
#[derive(Clone, Debug)]
pub struct ImageEditor {
    img: Array3<u8>,
    config: EditorConfig,
}

impl ImageEditor {
    /// Decode `path` as an 8-bit RGB image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, EditorConfig::default())
    }

    /// Decode `path` with non-default editing parameters.
    pub fn open_with_config(path: impl AsRef<Path>, config: EditorConfig) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| EditorError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgb8();

        let (width, height) = (decoded.width() as usize, decoded.height() as usize);
        let img = Array3::from_shape_vec((height, width, 3), decoded.into_raw())
            .map_err(|_| EditorError::EmptyImage)?;
        debug!("loaded {} as {:?}", path.display(), img.dim());

        Self::from_array(img).map(|editor| editor.with_config(config))
    }

    /// Wrap an already decoded (height, width, channels) buffer.
    pub fn from_array(img: Array3<u8>) -> Result<Self> {
        let (height, width, _) = img.dim();
        if height == 0 || width == 0 {
            return Err(EditorError::EmptyImage);
        }
        Ok(Self {
            img,
            config: EditorConfig::default(),
        })
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Grayscale the original, resize it to `scale`, then apply `method`.
    ///
    /// # Returns
    /// Plane of shape (scale.height, scale.width)
    pub fn edit_img_array(&self, method: EditMethod, scale: Scale) -> Result<Array2<u8>> {
        scale.validate()?;
        debug!("editing with {} at {}", method, scale);

        let gray = to_gray_u8(self.img.view())?;
        let gray = resize_gray_u8(gray.view(), scale.width, scale.height, Interpolation::Linear)?;

        let cfg = &self.config;
        match method {
            EditMethod::Gray => Ok(gray),
            EditMethod::GlobalEqualization => equalize_hist_u8(gray.view()),
            EditMethod::AdaptiveEqualization => {
                clahe_u8(gray.view(), cfg.clahe_clip_limit, cfg.clahe_tiles)
            }
            EditMethod::ContrastStretch => {
                contrast_stretch_u8(gray.view(), false, cfg.stretch_gain, cfg.stretch_bias)
            }
            EditMethod::Threshold => Ok(threshold_binary_u8(gray.view(), cfg.threshold)),
        }
    }

    /// [`edit_img_array`](Self::edit_img_array) at the configured default scale.
    pub fn edit_default(&self, method: EditMethod) -> Result<Array2<u8>> {
        self.edit_img_array(method, self.config.scale)
    }

    /// The decoded original, unmodified.
    pub fn get_no_edited_img(&self) -> ArrayView3<'_, u8> {
        self.img.view()
    }

    /// Resize the original to `scale` with area averaging.
    pub fn reshape_image(&self, scale: Scale) -> Result<Array3<u8>> {
        scale.validate()?;
        resize_u8(self.img.view(), scale.width, scale.height, Interpolation::Area)
    }

    /// Resize a caller-supplied 2D plane or 3D image with bilinear sampling.
    ///
    /// The rank and channel count of `img` are preserved.
    pub fn reshape_external(&self, scale: Scale, img: ArrayViewD<u8>) -> Result<ArrayD<u8>> {
        scale.validate()?;
        match img.ndim() {
            2 => {
                let plane = img
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| EditorError::UnsupportedRank { expected: "2", actual: 2 })?;
                if plane.is_empty() {
                    return Err(EditorError::EmptyImage);
                }
                Ok(resize_gray_u8(plane, scale.width, scale.height, Interpolation::Linear)?.into_dyn())
            }
            3 => {
                let image = img
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| EditorError::UnsupportedRank { expected: "3", actual: 3 })?;
                if image.len_of(Axis(0)) == 0 || image.len_of(Axis(1)) == 0 {
                    return Err(EditorError::EmptyImage);
                }
                Ok(resize_u8(image, scale.width, scale.height, Interpolation::Linear)?.into_dyn())
            }
            actual => Err(EditorError::UnsupportedRank {
                expected: "2 or 3",
                actual,
            }),
        }
    }

    /// Plot the pooled intensity distribution of `img` and block until dismissed.
    pub fn histogram(&self, img: ArrayViewD<u8>, stage: HistogramStage) -> Result<()> {
        self.histogram_with(&SystemViewer, img, stage)
    }

    pub fn histogram_with(
        &self,
        viewer: &dyn Viewer,
        img: ArrayViewD<u8>,
        stage: HistogramStage,
    ) -> Result<()> {
        if img.is_empty() {
            return Err(EditorError::EmptyImage);
        }
        let chart = render_bars(&flattened_histogram(img));
        viewer.show(stage.title(), chart.view().into_dyn(), self.config.display_timeout)
    }

    /// Per-channel histogram of `img`, plotted and optionally returned.
    ///
    /// # Returns
    /// `Some` array of shape (256, channels) when `output` is set
    pub fn calculate_hist(
        &self,
        img: ArrayViewD<u8>,
        stage: HistogramStage,
        output: bool,
    ) -> Result<Option<Array2<f32>>> {
        self.calculate_hist_with(&SystemViewer, img, stage, output)
    }

    pub fn calculate_hist_with(
        &self,
        viewer: &dyn Viewer,
        img: ArrayViewD<u8>,
        stage: HistogramStage,
        output: bool,
    ) -> Result<Option<Array2<f32>>> {
        let hist = calc_hist(img, stage.channels())?;
        let chart = render_lines(hist.view());
        viewer.show(stage.title(), chart.view().into_dyn(), self.config.display_timeout)?;
        Ok(output.then_some(hist))
    }

    /// Show `img` in a window labeled `Current Image{index}`.
    ///
    /// Blocks for up to `display_timeout` or until Enter is pressed.
    pub fn show_image(&self, img: ArrayViewD<u8>, index: usize) -> Result<()> {
        self.show_image_with(&SystemViewer, img, index)
    }

    pub fn show_image_with(
        &self,
        viewer: &dyn Viewer,
        img: ArrayViewD<u8>,
        index: usize,
    ) -> Result<()> {
        let label = format!("Current Image{}", index);
        viewer.show(&label, squeeze_trailing(img), self.config.display_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names_round_trip() {
        for method in EditMethod::ALL {
            assert_eq!(method.name().parse::<EditMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = "sharpen".parse::<EditMethod>().unwrap_err();
        assert!(matches!(err, EditorError::UnknownMethod(name) if name == "sharpen"));
    }

    #[test]
    fn test_binary_name_maps_to_stretch() {
        assert_eq!("binary".parse::<EditMethod>().unwrap(), EditMethod::ContrastStretch);
    }

    #[test]
    fn test_scale_validation() {
        assert!(Scale::new(0, 10).is_err());
        assert_eq!(Scale::new(3, 4).unwrap(), Scale { width: 3, height: 4 });
        assert_eq!(Scale::default().to_string(), "256x256");
    }

    #[test]
    fn test_empty_array_rejected() {
        let err = ImageEditor::from_array(Array3::zeros((0, 10, 3))).unwrap_err();
        assert!(matches!(err, EditorError::EmptyImage));
    }

    #[test]
    fn test_stage_channels() {
        assert_eq!(HistogramStage::PreEdit.channels(), &[0]);
        assert_eq!(HistogramStage::PostEdit.channels(), &[0, 1, 2]);
    }
}
