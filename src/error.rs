use std::io;

use thiserror::Error;

/// Errors reported by the fallible entry points of the library.
///
/// Capacity overruns and mismatched slice widths on the buffer append
/// operations are caller bugs and panic instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("coordinate array too small: needed {needed} floats, got {actual}")]
    InsufficientCoordinates { needed: usize, actual: usize },
    #[error("unsupported image format: {0:?}")]
    UnsupportedImageFormat(String),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
