//! Contrast-limited adaptive histogram equalization (CLAHE).
//!
//! The plane is split into a grid of tiles. Each tile gets its own
//! equalization curve built from a clipped histogram, and every output
//! pixel blends the curves of the four nearest tile centers.
//!
//! Planes whose size is not a multiple of the grid are padded on the right
//! and bottom with reflect-101 borders, so every tile has the same area.

use ndarray::{Array2, ArrayView2, Zip};
use rayon::prelude::*;

use crate::error::{EditorError, Result};

/// Reflect-101 border index (`dcb|abcd|cba`).
fn reflect_101(i: usize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let j = i % period;
    if j >= n {
        period - j
    } else {
        j
    }
}

/// Clip a histogram at `limit` and spread the excess over all bins.
fn clip_histogram(hist: &mut [u32; 256], limit: u32) {
    let mut clipped = 0u32;
    for count in hist.iter_mut() {
        if *count > limit {
            clipped += *count - limit;
            *count = limit;
        }
    }

    let batch = clipped / 256;
    let mut residual = clipped - batch * 256;
    for count in hist.iter_mut() {
        *count += batch;
    }

    if residual > 0 {
        let step = (256 / residual as usize).max(1);
        let mut i = 0;
        while i < 256 && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

/// Apply CLAHE to a grayscale plane.
///
/// # Arguments
/// * `input` - Grayscale plane (height, width)
/// * `clip_limit` - Contrast limit relative to a flat histogram (2.0 is typical).
///   Values <= 0 disable clipping.
/// * `tiles` - Tile grid as (columns, rows)
///
/// # Returns
/// Equalized plane of the same shape
pub fn clahe_u8(input: ArrayView2<u8>, clip_limit: f32, tiles: (usize, usize)) -> Result<Array2<u8>> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return Err(EditorError::EmptyImage);
    }
    let (tiles_x, tiles_y) = tiles;
    if tiles_x == 0 || tiles_y == 0 {
        return Err(EditorError::InvalidScale {
            width: tiles_x,
            height: tiles_y,
        });
    }

    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);
    let tile_area = tile_w * tile_h;

    let limit = (clip_limit > 0.0)
        .then(|| ((clip_limit * tile_area as f32 / 256.0) as u32).max(1));

    let luts: Vec<[u8; 256]> = (0..tiles_x * tiles_y)
        .into_par_iter()
        .map(|t| {
            let (ty, tx) = (t / tiles_x, t % tiles_x);
            let mut hist = [0u32; 256];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let sy = reflect_101(y, height);
                for x in tx * tile_w..(tx + 1) * tile_w {
                    let sx = reflect_101(x, width);
                    hist[input[[sy, sx]] as usize] += 1;
                }
            }

            if let Some(limit) = limit {
                clip_histogram(&mut hist, limit);
            }

            let scale = 255.0 / tile_area as f32;
            let mut lut = [0u8; 256];
            let mut sum = 0u32;
            for (i, &count) in hist.iter().enumerate() {
                sum += count;
                lut[i] = (sum as f32 * scale).round().clamp(0.0, 255.0) as u8;
            }
            lut
        })
        .collect();

    let inv_tw = 1.0 / tile_w as f32;
    let inv_th = 1.0 / tile_h as f32;

    let mut output = Array2::<u8>::zeros((height, width));
    Zip::indexed(&mut output).par_for_each(|(y, x), out| {
        let tyf = y as f32 * inv_th - 0.5;
        let ty1 = tyf.floor() as isize;
        let ya = tyf - ty1 as f32;
        let ty2 = ((ty1 + 1) as usize).min(tiles_y - 1);
        let ty1 = ty1.max(0) as usize;

        let txf = x as f32 * inv_tw - 0.5;
        let tx1 = txf.floor() as isize;
        let xa = txf - tx1 as f32;
        let tx2 = ((tx1 + 1) as usize).min(tiles_x - 1);
        let tx1 = tx1.max(0) as usize;

        let v = input[[y, x]] as usize;
        let lut = |ty: usize, tx: usize| luts[ty * tiles_x + tx][v] as f32;

        let top = lut(ty1, tx1) * (1.0 - xa) + lut(ty1, tx2) * xa;
        let bottom = lut(ty2, tx1) * (1.0 - xa) + lut(ty2, tx2) * xa;
        *out = (top * (1.0 - ya) + bottom * ya).round().clamp(0.0, 255.0) as u8;
    });

    Ok(output)
}
