//! Image Editor
//!
//! Loads a single image and derives contrast-enhanced grayscale copies from
//! it, with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Buffers are `ndarray` arrays of u8:
//! - **Decoded original**: (height, width, 3) - RGB
//! - **Edited output**: (height, width) - single grayscale plane
//! - **Channel-expanded**: (height, width, 1) and up, see [`add_new_channel`]
//!
//! ## Edits
//! [`ImageEditor::edit_img_array`] converts to grayscale, resizes, then applies
//! one [`EditMethod`]: plain gray, global histogram equalization, CLAHE,
//! gain/bias contrast stretch, or a binary threshold.
//!
//! ```no_run
//! use image_editor::{EditMethod, ImageEditor, Scale};
//!
//! let editor = ImageEditor::open("00000.jpg")?;
//! let clahe = editor.edit_img_array(EditMethod::AdaptiveEqualization, Scale::default())?;
//! assert_eq!(clahe.dim(), (256, 256));
//! # Ok::<(), image_editor::EditorError>(())
//! ```

pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod filters;
pub mod histogram;
pub mod plot;
pub mod shape;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::EditorConfig;
pub use display::{SystemViewer, Viewer};
pub use editor::{EditMethod, HistogramStage, ImageEditor, Scale};
pub use error::{EditorError, Result};
pub use shape::add_new_channel;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyArrayDyn, PyReadonlyArrayDyn};
    use pyo3::exceptions::{PyTypeError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::PyString;

    use crate::{EditMethod, EditorError, HistogramStage, ImageEditor, Scale};

    fn to_py_err(e: EditorError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }

    fn scale_from_tuple(scale: (usize, usize)) -> PyResult<Scale> {
        Scale::new(scale.0, scale.1).map_err(to_py_err)
    }

    fn stage_from_flag(preedit: bool) -> HistogramStage {
        if preedit {
            HistogramStage::PreEdit
        } else {
            HistogramStage::PostEdit
        }
    }

    /// Python-facing editor with the classic camelCase method names.
    #[pyclass(name = "ImageEditor")]
    pub struct PyImageEditor {
        inner: ImageEditor,
    }

    #[pymethods]
    impl PyImageEditor {
        /// Decode the image at `path`. Raises TypeError for non-str paths.
        #[new]
        fn new(path: &Bound<'_, PyAny>) -> PyResult<Self> {
            let path = path
                .downcast::<PyString>()
                .map_err(|_| PyTypeError::new_err("this is not a string path"))?;
            let inner = ImageEditor::open(path.to_str()?).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        /// Grayscale, resize to `scale` (width, height) and apply `method`.
        #[pyo3(name = "editImgArray", signature = (method, scale = (256, 256)))]
        fn edit_img_array<'py>(
            &self,
            py: Python<'py>,
            method: &str,
            scale: (usize, usize),
        ) -> PyResult<Bound<'py, PyArray2<u8>>> {
            let method: EditMethod = method.parse().map_err(to_py_err)?;
            let result = self
                .inner
                .edit_img_array(method, scale_from_tuple(scale)?)
                .map_err(to_py_err)?;
            Ok(result.into_pyarray(py))
        }

        #[pyo3(name = "getNoEditedImg")]
        fn get_no_edited_img<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
            self.inner.get_no_edited_img().to_owned().into_pyarray(py)
        }

        /// Resize the original (area) or `ext_img` (bilinear) to `new_shape`.
        #[pyo3(name = "reshapeImage", signature = (new_shape, ext_img = None))]
        fn reshape_image<'py>(
            &self,
            py: Python<'py>,
            new_shape: (usize, usize),
            ext_img: Option<PyReadonlyArrayDyn<'py, u8>>,
        ) -> PyResult<Bound<'py, PyArrayDyn<u8>>> {
            let scale = scale_from_tuple(new_shape)?;
            let result = match ext_img {
                Some(ext) => self.inner.reshape_external(scale, ext.as_array()),
                None => self.inner.reshape_image(scale).map(|img| img.into_dyn()),
            }
            .map_err(to_py_err)?;
            Ok(result.into_pyarray(py))
        }

        #[staticmethod]
        #[pyo3(name = "addNewChannel", signature = (img, channel, new_axis = false))]
        fn add_new_channel<'py>(
            py: Python<'py>,
            img: PyReadonlyArrayDyn<'py, u8>,
            channel: usize,
            new_axis: bool,
        ) -> PyResult<Bound<'py, PyArrayDyn<u8>>> {
            let result = crate::add_new_channel(img.as_array().to_owned(), channel, new_axis)
                .map_err(to_py_err)?;
            Ok(result.into_pyarray(py))
        }

        #[pyo3(signature = (img, preedit = true))]
        fn histogram(&self, img: PyReadonlyArrayDyn<'_, u8>, preedit: bool) -> PyResult<()> {
            self.inner
                .histogram(img.as_array(), stage_from_flag(preedit))
                .map_err(to_py_err)
        }

        #[pyo3(name = "calculateHist", signature = (img, preedit = true, output = false))]
        fn calculate_hist<'py>(
            &self,
            py: Python<'py>,
            img: PyReadonlyArrayDyn<'py, u8>,
            preedit: bool,
            output: bool,
        ) -> PyResult<Option<Bound<'py, PyArray2<f32>>>> {
            let hist = self
                .inner
                .calculate_hist(img.as_array(), stage_from_flag(preedit), output)
                .map_err(to_py_err)?;
            Ok(hist.map(|h| h.into_pyarray(py)))
        }

        #[pyo3(name = "showImage", signature = (img, index = 0))]
        fn show_image(&self, img: PyReadonlyArrayDyn<'_, u8>, index: usize) -> PyResult<()> {
            self.inner.show_image(img.as_array(), index).map_err(to_py_err)
        }
    }

    /// Image Editor Python extension module
    #[pymodule]
    pub fn image_editor(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyImageEditor>()?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::image_editor;
