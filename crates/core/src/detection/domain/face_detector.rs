use thiserror::Error;

use crate::detection::domain::detection_params::{DetectionParams, ParamError};
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("detector expects a single-channel frame, got {0} channels")]
    NotGrayscale(u8),
    #[error(transparent)]
    InvalidParams(#[from] ParamError),
    #[error("no face detection backend compiled in (enable the `opencv` feature)")]
    BackendUnavailable,
    #[error("failed to load cascade classifier from {path}: {reason}")]
    CascadeLoad { path: String, reason: String },
    #[error("face detection failed: {0}")]
    Backend(String),
    #[error("failed to annotate detections: {0}")]
    Annotation(String),
}

/// Domain interface for the external multi-scale face detector.
///
/// Given a luminance frame and scan parameters, returns zero or more
/// axis-aligned rectangles. An empty result is a valid answer, not an
/// error. Backends may keep native state between calls, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        gray: &Frame,
        params: &DetectionParams,
    ) -> Result<Vec<FaceRect>, DetectionError>;
}
