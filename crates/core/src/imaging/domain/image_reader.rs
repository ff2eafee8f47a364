use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has zero width or height")]
    ZeroDimensions,
}

/// Loads a still image as an RGB frame.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, ImageReadError>;

    /// Decodes an in-memory encoded image (e.g. an uploaded file).
    fn decode(&self, bytes: &[u8]) -> Result<Frame, ImageReadError>;
}
