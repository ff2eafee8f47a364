use std::path::Path;

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Scan flags passed to `detectMultiScale`; 0 selects the default
/// behavior for new-style cascades.
const SCAN_FLAGS: i32 = 0;

/// Face detector backed by OpenCV's Haar cascade classifier.
///
/// The cascade XML is parsed once on construction; every `detect` call is
/// a single `detectMultiScale` scan with square minimum windows and no
/// maximum size.
pub struct HaarCascadeDetector {
    classifier: CascadeClassifier,
}

// Safety: the classifier is owned by exactly one detector, and detectors are
// moved between threads but never shared.
unsafe impl Send for HaarCascadeDetector {}

impl HaarCascadeDetector {
    pub fn load(path: &Path) -> Result<Self, DetectionError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| load_error(path, "path is not valid UTF-8"))?;

        let classifier =
            CascadeClassifier::new(path_str).map_err(|e| load_error(path, &e.to_string()))?;

        // OpenCV reports a missing or unparsable file as an empty classifier.
        if classifier
            .empty()
            .map_err(|e| load_error(path, &e.to_string()))?
        {
            return Err(load_error(path, "cascade is empty or unreadable"));
        }

        log::info!("Loaded Haar cascade from {}", path.display());
        Ok(Self { classifier })
    }
}

impl FaceDetector for HaarCascadeDetector {
    fn detect(
        &mut self,
        gray: &Frame,
        params: &DetectionParams,
    ) -> Result<Vec<FaceRect>, DetectionError> {
        if !gray.is_luma() {
            return Err(DetectionError::NotGrayscale(gray.channels()));
        }
        params.validate()?;

        let rows = gray.height() as i32;
        let cols = gray.width() as i32;
        let mat = Mat::new_rows_cols_with_data(rows, cols, gray.data()).map_err(backend_error)?;

        let min_size = params.min_size as i32;
        let mut faces = Vector::<Rect>::new();
        self.classifier
            .detect_multi_scale(
                &*mat,
                &mut faces,
                params.scale_factor,
                params.min_neighbors as i32,
                SCAN_FLAGS,
                Size::new(min_size, min_size),
                Size::new(0, 0),
            )
            .map_err(backend_error)?;

        Ok(faces
            .iter()
            .map(|r| FaceRect::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

fn load_error(path: &Path, reason: &str) -> DetectionError {
    DetectionError::CascadeLoad {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn backend_error(e: opencv::Error) -> DetectionError {
    DetectionError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_cascade_error() {
        let result = HaarCascadeDetector::load(Path::new("/nonexistent/cascade.xml"));
        assert!(matches!(result, Err(DetectionError::CascadeLoad { .. })));
    }

    #[test]
    fn test_load_garbage_file_is_cascade_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, b"this is not a cascade").unwrap();

        let result = HaarCascadeDetector::load(&path);
        assert!(matches!(result, Err(DetectionError::CascadeLoad { .. })));
    }

    #[test]
    fn test_load_error_names_the_path() {
        let err = HaarCascadeDetector::load(Path::new("/nonexistent/cascade.xml"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/cascade.xml"));
    }
}
