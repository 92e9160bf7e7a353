//! Fixed editing constants, bundled so callers can override them.

use std::time::Duration;

use crate::editor::Scale;

/// Parameters used by [`ImageEditor`](crate::ImageEditor).
///
/// The defaults reproduce the classic settings: 256x256 working size,
/// CLAHE with clip limit 2.0 over an 8x8 tile grid, contrast stretch with
/// gain 1.10 and bias 20, threshold at 110, and a 200 second display wait.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    pub scale: Scale,
    pub clahe_clip_limit: f32,
    pub clahe_tiles: (usize, usize),
    pub stretch_gain: f32,
    pub stretch_bias: f32,
    pub threshold: u8,
    pub display_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            clahe_clip_limit: 2.0,
            clahe_tiles: (8, 8),
            stretch_gain: 1.10,
            stretch_bias: 20.0,
            threshold: 110,
            display_timeout: Duration::from_secs(200),
        }
    }
}
