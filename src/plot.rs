//! Rasterized histogram charts.
//!
//! Charts are plain RGB buffers of shape (height, width, 3) so they go
//! through the same [`Viewer`](crate::display::Viewer) as any image.

use ndarray::{Array3, ArrayView2};

use crate::histogram::BINS;

const BIN_WIDTH: usize = 2;
const PLOT_HEIGHT: usize = 200;
const MARGIN: usize = 16;

pub const CHART_WIDTH: usize = BINS * BIN_WIDTH + 2 * MARGIN;
pub const CHART_HEIGHT: usize = PLOT_HEIGHT + 2 * MARGIN;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const AXIS: [u8; 3] = [0, 0, 0];
const BAR: [u8; 3] = [31, 119, 180];

/// Line colors per series; one series is drawn in the bar color.
const SERIES: [[u8; 3]; 3] = [[31, 119, 180], [44, 160, 44], [214, 39, 40]];

fn blank_chart() -> Array3<u8> {
    let mut chart = Array3::<u8>::zeros((CHART_HEIGHT, CHART_WIDTH, 3));
    for y in 0..CHART_HEIGHT {
        for x in 0..CHART_WIDTH {
            put(&mut chart, y, x, BACKGROUND);
        }
    }

    let baseline = MARGIN + PLOT_HEIGHT;
    for x in MARGIN..(CHART_WIDTH - MARGIN) {
        put(&mut chart, baseline, x, AXIS);
    }
    for y in MARGIN..=baseline {
        put(&mut chart, y, MARGIN - 1, AXIS);
    }
    chart
}

#[inline]
fn put(chart: &mut Array3<u8>, y: usize, x: usize, color: [u8; 3]) {
    for (c, &v) in color.iter().enumerate() {
        chart[[y, x, c]] = v;
    }
}

/// Pixel row for a value scaled against `max`.
fn row_for(value: f32, max: f32) -> usize {
    let frac = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    MARGIN + PLOT_HEIGHT - (frac * PLOT_HEIGHT as f32).round() as usize
}

/// Render a 256-bin histogram as a bar chart.
pub fn render_bars(hist: &[u32; BINS]) -> Array3<u8> {
    let mut chart = blank_chart();
    let max = hist.iter().copied().max().unwrap_or(0) as f32;
    let baseline = MARGIN + PLOT_HEIGHT;

    for (bin, &count) in hist.iter().enumerate() {
        let top = row_for(count as f32, max);
        for dx in 0..BIN_WIDTH {
            let x = MARGIN + bin * BIN_WIDTH + dx;
            for y in top..baseline {
                put(&mut chart, y, x, BAR);
            }
        }
    }
    chart
}

/// Render one or more histogram columns as line plots.
///
/// # Arguments
/// * `hist` - Array of shape (256, series) as returned by
///   [`calc_hist`](crate::histogram::calc_hist)
pub fn render_lines(hist: ArrayView2<f32>) -> Array3<u8> {
    let mut chart = blank_chart();
    let (bins, series) = hist.dim();
    let max = hist.iter().copied().fold(0.0f32, f32::max);

    for s in 0..series {
        let color = SERIES[s % SERIES.len()];
        let mut prev: Option<usize> = None;
        for bin in 0..bins.min(BINS) {
            let row = row_for(hist[[bin, s]], max);
            let (lo, hi) = match prev {
                Some(p) => (p.min(row), p.max(row)),
                None => (row, row),
            };
            for dx in 0..BIN_WIDTH {
                let x = MARGIN + bin * BIN_WIDTH + dx;
                for y in lo..=hi {
                    put(&mut chart, y, x, color);
                }
            }
            prev = Some(row);
        }
    }
    chart
}
