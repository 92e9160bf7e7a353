//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and work on
//! flat row-major byte buffers, since there is no file system to decode from.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::editor::{EditMethod, ImageEditor, Scale};
use crate::error::EditorError;

fn to_js(e: EditorError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn editor_from_raw(data: &[u8], width: usize, height: usize, channels: usize) -> Result<ImageEditor, JsValue> {
    let img = Array3::from_shape_vec((height, width, channels), data.to_vec())
        .map_err(|e| JsValue::from_str(&format!("Invalid dimensions: {}", e)))?;
    ImageEditor::from_array(img).map_err(to_js)
}

/// Grayscale, resize and edit an RGBA image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `method` - `gray`, `equalizationHist`, `clahe`, `binary` or `threshold`
/// * `out_width` - Output width in pixels
/// * `out_height` - Output height in pixels
///
/// # Returns
/// Flat array of gray bytes (length = out_width * out_height)
#[wasm_bindgen]
pub fn edit_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    method: &str,
    out_width: usize,
    out_height: usize,
) -> Result<Vec<u8>, JsValue> {
    let editor = editor_from_raw(data, width, height, 4)?;
    let method: EditMethod = method.parse().map_err(to_js)?;
    let scale = Scale::new(out_width, out_height).map_err(to_js)?;
    let result = editor.edit_img_array(method, scale).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Same as [`edit_rgba_wasm`] for a single-channel gray buffer.
#[wasm_bindgen]
pub fn edit_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    method: &str,
    out_width: usize,
    out_height: usize,
) -> Result<Vec<u8>, JsValue> {
    let editor = editor_from_raw(data, width, height, 1)?;
    let method: EditMethod = method.parse().map_err(to_js)?;
    let scale = Scale::new(out_width, out_height).map_err(to_js)?;
    let result = editor.edit_img_array(method, scale).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}
