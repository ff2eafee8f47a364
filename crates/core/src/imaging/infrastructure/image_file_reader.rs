use std::path::Path;

use crate::imaging::domain::image_reader::{ImageReadError, ImageReader};
use crate::shared::frame::Frame;

/// Decodes PNG and JPEG files with the `image` crate.
///
/// Every input is normalised to 8-bit RGB: alpha is dropped, grayscale
/// and palette images are expanded.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, ImageReadError> {
        let bytes = std::fs::read(path).map_err(|source| ImageReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let frame = self.decode(&bytes)?;
        log::debug!(
            "Loaded {} ({}x{})",
            path.display(),
            frame.width(),
            frame.height()
        );
        Ok(frame)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Frame, ImageReadError> {
        let rgb = image::load_from_memory(bytes)?.into_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(ImageReadError::ZeroDimensions);
        }
        Ok(Frame::from_rgb_image(rgb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let img = RgbImage::from_pixel(width, height, Rgb([50, 100, 200]));
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_read_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "a.png", 100, 80);

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_read_jpeg_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "a.jpg", 64, 48);

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (64, 48));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]))
            .save(&path)
            .unwrap();

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_read_nonexistent_is_io_error() {
        let result = ImageFileReader::new().read(Path::new("/nonexistent/test.png"));
        assert!(matches!(result, Err(ImageReadError::Io { .. })));
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let result = ImageFileReader::new().decode(b"definitely not an image");
        assert!(matches!(result, Err(ImageReadError::Decode(_))));
    }
}
