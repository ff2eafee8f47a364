use thiserror::Error;

use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("annotation requires an RGB frame, got {0} channels")]
    UnsupportedChannels(u8),
    #[error("frame buffer does not match its {0}x{1} dimensions")]
    MalformedFrame(u32, u32),
}

/// Domain interface for marking detected faces within a frame.
///
/// Implementations modify the frame in-place (`&mut Frame`); callers that
/// must keep the original annotate a copy.
pub trait FrameAnnotator: Send {
    fn annotate(&self, frame: &mut Frame, faces: &[FaceRect]) -> Result<(), AnnotationError>;
}
