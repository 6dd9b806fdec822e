use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Everything that can go wrong while building or reading a dataset.
/// Nothing here is recovered internally, callers decide whether to skip or retry.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("image file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not decode image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("index {index} out of bounds for dataset of length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("invalid partition range {start}..{end} for file index of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("record {position} has a non-integer class {class:?}")]
    InvalidClass { position: usize, class: String },

    #[error("io error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed file index")]
    IndexFormat(#[from] serde_json::Error),
}
