use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use facescan_core::annotation::infrastructure::outline_annotator::OutlineAnnotator;
use facescan_core::detection::domain::detection_params::DetectionParams;
use facescan_core::detection::infrastructure::detector_factory::create_detector;
use facescan_core::pipeline::detect_faces_use_case::{DetectFacesUseCase, DetectionOutcome};
use facescan_core::shared::frame::Frame;

use super::model_cache::ModelCache;

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    DownloadProgress(u64, u64),
    Complete(Arc<DetectionOutcome>),
    Error(String),
}

/// One run of the detection wrapper on the selected image.
pub struct DetectionJob {
    pub frame: Arc<Frame>,
    pub params: DetectionParams,
    pub model_cache: Arc<ModelCache>,
}

/// Spawn a short-lived worker for a single detection run.
pub fn spawn(job: DetectionJob) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerMessage>();

    thread::spawn(move || match run_detection(&tx, &job) {
        Ok(outcome) => {
            let _ = tx.send(WorkerMessage::Complete(Arc::new(outcome)));
        }
        Err(e) => {
            log::error!("Detection failed: {e}");
            let _ = tx.send(WorkerMessage::Error(e.to_string()));
        }
    });

    rx
}

fn run_detection(
    tx: &Sender<WorkerMessage>,
    job: &DetectionJob,
) -> Result<DetectionOutcome, Box<dyn std::error::Error>> {
    let tx_dl = tx.clone();
    let cascade_path = job
        .model_cache
        .wait_for_cascade(&|downloaded, total| {
            let _ = tx_dl.send(WorkerMessage::DownloadProgress(downloaded, total));
        })
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    let detector = create_detector(&cascade_path)?;
    let mut use_case = DetectFacesUseCase::new(detector, Box::new(OutlineAnnotator::default()));
    Ok(use_case.execute(&job.frame, &job.params)?)
}
