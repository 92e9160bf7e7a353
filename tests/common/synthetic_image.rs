use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Generates a low-contrast RGB gradient with a brighter diagonal band.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbImage::from_fn(width, height, |x, y| {
        let base = 80 + ((x + y) % 48) as u8;
        let band = if (x as i64 - y as i64).abs() < 8 { 40 } else { 0 };
        Rgb([base + band, base, base.saturating_sub(30)])
    })
}

/// Writes `img` as `<name>.png` inside `dir` and returns its path.
pub fn write_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(format!("{name}.png"));
    img.save(&path).expect("write test image");
    path
}
