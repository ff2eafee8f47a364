use std::path::Path;

use crate::imaging::domain::image_writer::{ImageWriteError, ImageWriter};
use crate::shared::frame::Frame;

/// Writes a single frame to an image file using the `image` crate.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), ImageWriteError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ImageWriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let img = frame
            .to_rgb_image()
            .ok_or(ImageWriteError::UnsupportedChannels(frame.channels()))?;
        img.save(path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}
