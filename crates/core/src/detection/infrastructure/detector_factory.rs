use std::path::Path;

use crate::detection::domain::face_detector::{DetectionError, FaceDetector};

/// Creates the cascade detector for the given cascade XML file.
///
/// Without the `opencv` feature no backend exists and this always fails
/// with [`DetectionError::BackendUnavailable`].
pub fn create_detector(cascade_path: &Path) -> Result<Box<dyn FaceDetector>, DetectionError> {
    #[cfg(feature = "opencv")]
    {
        use super::haar_cascade_detector::HaarCascadeDetector;

        log::info!("Using OpenCV Haar cascade backend");
        Ok(Box::new(HaarCascadeDetector::load(cascade_path)?))
    }
    #[cfg(not(feature = "opencv"))]
    {
        log::warn!(
            "Cannot load {}: built without a detection backend",
            cascade_path.display()
        );
        Err(DetectionError::BackendUnavailable)
    }
}

pub fn backend_available() -> bool {
    cfg!(feature = "opencv")
}
