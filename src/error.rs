//! Error type shared by every fallible editor operation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("the image array is empty")]
    EmptyImage,

    #[error("invalid scale {width}x{height}, both sides must be positive")]
    InvalidScale { width: usize, height: usize },

    #[error("unknown edit method: {0:?}")]
    UnknownMethod(String),

    #[error("unsupported array rank {actual}, expected {expected}")]
    UnsupportedRank { expected: &'static str, actual: usize },

    #[error("cannot reshape array of shape {from:?} into {to:?}")]
    ShapeMismatch { from: Vec<usize>, to: Vec<usize> },

    #[error("channel {channel} out of range for image with {channels} channel(s)")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("failed to encode preview: {0}")]
    Encode(#[source] image::ImageError),

    #[error("preview file error: {0}")]
    Io(#[from] std::io::Error),
}
