use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Result of one detection run: the annotated copy and what was found.
#[derive(Clone, Debug)]
pub struct DetectionOutcome {
    pub annotated: Frame,
    pub faces: Vec<FaceRect>,
}

impl DetectionOutcome {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Single-image detection: luminance → detect → annotate a copy.
///
/// One call to the detector per run, with no retries and no fallback
/// parameters. The input frame is never modified.
pub struct DetectFacesUseCase {
    detector: Box<dyn FaceDetector>,
    annotator: Box<dyn FrameAnnotator>,
}

impl DetectFacesUseCase {
    pub fn new(detector: Box<dyn FaceDetector>, annotator: Box<dyn FrameAnnotator>) -> Self {
        Self {
            detector,
            annotator,
        }
    }

    pub fn execute(
        &mut self,
        frame: &Frame,
        params: &DetectionParams,
    ) -> Result<DetectionOutcome, DetectionError> {
        params.validate()?;
        let start = Instant::now();

        let gray = frame.to_luma();
        let faces = self.detector.detect(&gray, params)?;

        let mut annotated = frame.clone();
        self.annotator
            .annotate(&mut annotated, &faces)
            .map_err(|e| DetectionError::Annotation(e.to_string()))?;

        log::info!(
            "Detected {} face(s) in {}x{} image [{}] in {:.1} ms",
            faces.len(),
            frame.width(),
            frame.height(),
            params,
            start.elapsed().as_secs_f64() * 1000.0
        );
        for face in &faces {
            log::debug!("face at {face}");
        }

        Ok(DetectionOutcome { annotated, faces })
    }
}
