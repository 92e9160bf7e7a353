//! Pixel filters behind [`ImageEditor`](crate::ImageEditor).
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale plane | (H, W) | u8 | Single luminance plane, 0-255 |
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! Color inputs are accepted by [`grayscale`] and [`resize`]. The contrast
//! filters ([`equalize`], [`clahe`], [`contrast`]) work on grayscale planes.
//!
//! ## Architecture
//!
//! - **Pure functions** - every filter borrows a view and returns a new array
//! - **Typed failures** - empty inputs and bad parameters return `EditorError`
//! - **Thread-safe** - per-pixel loops run on rayon through `ndarray::Zip`

pub mod grayscale;
pub mod resize;
pub mod equalize;
pub mod clahe;
pub mod contrast;
