//! State of the demonstration tab: which image is selected, what the
//! example folder holds, and where the current detection run stands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use iced::widget::image::Handle;

use facescan_core::imaging::domain::image_reader::ImageReader;
use facescan_core::imaging::infrastructure::example_gallery::ExampleGallery;
use facescan_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facescan_core::pipeline::detection_report::DetectionReport;
use facescan_core::pipeline::interaction::InteractionError;
use facescan_core::shared::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Upload,
    Example,
}

impl ImageSource {
    pub fn label(self) -> &'static str {
        match self {
            ImageSource::Upload => "Fazer upload da minha imagem",
            ImageSource::Example => "Selecionar uma imagem de exemplo",
        }
    }
}

/// A decoded image ready for display and detection.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub frame: Arc<Frame>,
    pub handle: Handle,
}

impl SourceImage {
    pub fn new(name: String, frame: Frame) -> Self {
        let handle = display_handle(&frame);
        Self {
            name,
            frame: Arc::new(frame),
            handle,
        }
    }
}

pub fn display_handle(frame: &Frame) -> Handle {
    Handle::from_rgba(frame.width(), frame.height(), frame.to_rgba_bytes())
}

/// Decode an image file for the original pane.
pub fn load_image(path: &Path) -> Result<SourceImage, InteractionError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    ImageFileReader::new()
        .read(path)
        .map(|frame| SourceImage::new(name, frame))
        .map_err(|e| {
            log::warn!("Could not load {}: {e}", path.display());
            InteractionError::UnreadableImage(e.to_string())
        })
}

/// What the example folder looked like when last scanned.
#[derive(Debug, Clone)]
pub enum ExampleListing {
    Unavailable(InteractionError),
    Empty(InteractionError),
    Ready(ExampleGallery),
}

impl ExampleListing {
    pub fn scan(dir: &Path) -> Self {
        match ExampleGallery::scan(dir) {
            Err(e) => {
                log::warn!("Example folder unavailable: {e}");
                ExampleListing::Unavailable(InteractionError::from(&e))
            }
            Ok(gallery) if gallery.is_empty() => ExampleListing::Empty(
                InteractionError::NoExampleImages(dir.display().to_string()),
            ),
            Ok(gallery) => ExampleListing::Ready(gallery),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetectionView {
    pub handle: Handle,
    pub report: DetectionReport,
}

#[derive(Debug, Clone, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running {
        /// Frame the worker is scanning; its result is only shown while
        /// this is still the selected image.
        frame: Arc<Frame>,
        downloaded: u64,
        total: u64,
    },
    Finished(DetectionView),
    Failed(String),
}

#[derive(Debug)]
pub struct DemoState {
    pub source: ImageSource,
    pub uploaded: Option<SourceImage>,
    pub listing: Option<ExampleListing>,
    pub selected_example: Option<String>,
    pub example_image: Option<SourceImage>,
    pub run: RunState,
    /// Error shown in place of a result (no image, unreadable upload).
    pub notice: Option<InteractionError>,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            source: ImageSource::Upload,
            uploaded: None,
            listing: None,
            selected_example: None,
            example_image: None,
            run: RunState::Idle,
            notice: None,
        }
    }
}

impl DemoState {
    pub fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running { .. })
    }

    /// Switch source. Results belong to the image they were computed on.
    pub fn set_source(&mut self, source: ImageSource) {
        if self.source != source {
            self.source = source;
            self.clear_result();
        }
    }

    /// Rescan the example folder and preselect its first image.
    /// Returns the path to load, if any.
    pub fn scan_examples(&mut self, dir: &Path) -> Option<PathBuf> {
        let listing = ExampleListing::scan(dir);
        self.example_image = None;
        self.selected_example = match &listing {
            ExampleListing::Ready(gallery) => gallery.first().map(str::to_string),
            _ => None,
        };
        self.listing = Some(listing);
        self.selected_example
            .clone()
            .and_then(|name| self.example_path(&name))
    }

    /// Select an example by name. Returns the path to load.
    pub fn select_example(&mut self, name: String) -> Option<PathBuf> {
        let path = self.example_path(&name)?;
        self.selected_example = Some(name);
        self.example_image = None;
        self.clear_result();
        Some(path)
    }

    fn example_path(&self, name: &str) -> Option<PathBuf> {
        match &self.listing {
            Some(ExampleListing::Ready(gallery)) => gallery.path_of(name).ok(),
            _ => None,
        }
    }

    /// Store a freshly decoded image for the active source.
    pub fn image_loaded(&mut self, source: ImageSource, result: Result<SourceImage, InteractionError>) {
        match result {
            Ok(image) => {
                match source {
                    ImageSource::Upload => self.uploaded = Some(image),
                    ImageSource::Example => {
                        if self.selected_example.as_deref() != Some(image.name.as_str()) {
                            return;
                        }
                        self.example_image = Some(image);
                    }
                }
                if self.source == source {
                    self.clear_result();
                }
            }
            Err(e) => {
                if source == ImageSource::Upload {
                    self.uploaded = None;
                }
                if !self.is_running() {
                    self.run = RunState::Idle;
                }
                self.notice = Some(e);
            }
        }
    }

    /// Image the next run would use, if one is selected for the active source.
    pub fn current_image(&self) -> Option<&SourceImage> {
        match self.source {
            ImageSource::Upload => self.uploaded.as_ref(),
            ImageSource::Example => self.example_image.as_ref(),
        }
    }

    /// Begin a run. Ignored while another one is in flight.
    ///
    /// Returns the frame to hand to the worker, `Ok(None)` if a run is
    /// already going, or the error to show when no image is selected.
    pub fn start_run(&mut self) -> Result<Option<Arc<Frame>>, InteractionError> {
        if self.is_running() {
            return Ok(None);
        }
        let Some(image) = self.current_image() else {
            let err = InteractionError::NoImageSelected;
            self.run = RunState::Idle;
            self.notice = Some(err.clone());
            return Err(err);
        };
        let frame = image.frame.clone();
        self.notice = None;
        self.run = RunState::Running {
            frame: frame.clone(),
            downloaded: 0,
            total: 0,
        };
        Ok(Some(frame))
    }

    pub fn download_progress(&mut self, downloaded: u64, total: u64) {
        if let RunState::Running {
            downloaded: d,
            total: t,
            ..
        } = &mut self.run
        {
            *d = downloaded;
            *t = total;
        }
    }

    /// Show the annotated copy, unless the selection moved on while the
    /// worker ran. A stale result is dropped and the run ends idle.
    pub fn finish_run(&mut self, annotated: &Frame, face_count: usize) {
        if !self.run_matches_selection() {
            log::info!("Discarding detection result for an image no longer selected");
            self.run = RunState::Idle;
            return;
        }
        self.run = RunState::Finished(DetectionView {
            handle: display_handle(annotated),
            report: DetectionReport::from_count(face_count),
        });
    }

    fn run_matches_selection(&self) -> bool {
        match (&self.run, self.current_image()) {
            (RunState::Running { frame, .. }, Some(image)) => Arc::ptr_eq(frame, &image.frame),
            _ => false,
        }
    }

    pub fn fail_run(&mut self, message: String) {
        self.run = if self.run_matches_selection() {
            RunState::Failed(message)
        } else {
            log::warn!("Detection failed for an image no longer selected: {message}");
            RunState::Idle
        };
    }

    fn clear_result(&mut self) {
        if !self.is_running() {
            self.run = RunState::Idle;
        }
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn image(name: &str) -> SourceImage {
        SourceImage::new(name.to_string(), Frame::new(vec![0u8; 4 * 3 * 3], 4, 3, 3))
    }

    fn write_png(dir: &Path, name: &str) {
        let img = ::image::RgbImage::new(4, 4);
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_run_without_image_is_rejected() {
        let mut state = DemoState::default();
        let err = state.start_run().unwrap_err();
        assert_eq!(err, InteractionError::NoImageSelected);
        assert_eq!(state.notice, Some(InteractionError::NoImageSelected));
        assert!(!state.is_running());
    }

    #[test]
    fn test_run_with_upload_starts() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("me.png")));
        let frame = state.start_run().unwrap().unwrap();
        assert_eq!(frame.width(), 4);
        assert!(state.is_running());
    }

    #[test]
    fn test_second_trigger_ignored_while_running() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("me.png")));
        state.start_run().unwrap();
        assert!(state.start_run().unwrap().is_none());
        assert!(state.is_running());
    }

    #[test]
    fn test_finish_reports_face_count() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("me.png")));
        let frame = state.start_run().unwrap().unwrap();
        state.finish_run(&frame, 1);

        match &state.run {
            RunState::Finished(view) => {
                assert_eq!(view.report.message(), "1 face(s) detectada(s)!")
            }
            other => panic!("unexpected run state {other:?}"),
        }
        assert!(!state.is_running());
    }

    #[test]
    fn test_finish_with_zero_faces_is_not_success() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("me.png")));
        let frame = state.start_run().unwrap().unwrap();
        state.finish_run(&frame, 0);

        let RunState::Finished(view) = &state.run else {
            panic!("expected a finished run");
        };
        assert!(!view.report.is_success());
    }

    #[test]
    fn test_failed_load_mid_run_keeps_run_in_flight() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("a.png")));
        state.start_run().unwrap().unwrap();

        state.image_loaded(
            ImageSource::Upload,
            Err(InteractionError::UnreadableImage("broken.png".into())),
        );
        assert!(state.is_running());
        assert!(matches!(state.notice, Some(InteractionError::UnreadableImage(_))));

        state.image_loaded(ImageSource::Upload, Ok(image("b.png")));
        assert!(state.start_run().unwrap().is_none());
    }

    #[test]
    fn test_result_for_replaced_upload_is_dropped() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("a.png")));
        let frame_a = state.start_run().unwrap().unwrap();

        let wider = Frame::new(vec![0u8; 9 * 3 * 3], 9, 3, 3);
        state.image_loaded(ImageSource::Upload, Ok(SourceImage::new("b.png".into(), wider)));
        assert!(state.is_running());

        state.finish_run(&frame_a, 1);
        assert!(matches!(state.run, RunState::Idle));
        assert_eq!(state.current_image().unwrap().frame.width(), 9);
        assert!(state.start_run().unwrap().is_some());
    }

    #[test]
    fn test_result_dropped_after_source_switch() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("a.png")));
        let frame = state.start_run().unwrap().unwrap();

        state.set_source(ImageSource::Example);
        state.finish_run(&frame, 2);
        assert!(matches!(state.run, RunState::Idle));
    }

    #[test]
    fn test_failure_for_replaced_upload_is_dropped() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("a.png")));
        state.start_run().unwrap();
        state.image_loaded(ImageSource::Upload, Ok(image("b.png")));

        state.fail_run("cascade missing".into());
        assert!(matches!(state.run, RunState::Idle));
    }

    #[test]
    fn test_failure_for_current_image_is_shown() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("a.png")));
        state.start_run().unwrap();

        state.fail_run("cascade missing".into());
        assert!(matches!(state.run, RunState::Failed(ref m) if m == "cascade missing"));
    }

    #[test]
    fn test_download_progress_updates_running_state() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("a.png")));
        state.start_run().unwrap();

        state.download_progress(10, 40);
        assert!(matches!(
            state.run,
            RunState::Running {
                downloaded: 10,
                total: 40,
                ..
            }
        ));
    }

    #[test]
    fn test_upload_is_not_used_in_example_mode() {
        let mut state = DemoState::default();
        state.image_loaded(ImageSource::Upload, Ok(image("me.png")));
        state.set_source(ImageSource::Example);
        assert!(state.current_image().is_none());
        assert!(state.start_run().is_err());
    }

    #[test]
    fn test_unreadable_upload_shows_error() {
        let mut state = DemoState::default();
        state.image_loaded(
            ImageSource::Upload,
            Err(InteractionError::UnreadableImage("bad".into())),
        );
        assert!(state.uploaded.is_none());
        assert!(matches!(state.notice, Some(InteractionError::UnreadableImage(_))));
    }

    #[test]
    fn test_missing_example_folder_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = DemoState::default();
        state.set_source(ImageSource::Example);
        let path = state.scan_examples(&dir.path().join("imagens"));

        assert!(path.is_none());
        match &state.listing {
            Some(ExampleListing::Unavailable(e)) => assert!(!e.is_warning()),
            other => panic!("unexpected listing {other:?}"),
        }
    }

    #[test]
    fn test_empty_example_folder_is_warning_without_selection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let mut state = DemoState::default();
        state.set_source(ImageSource::Example);

        assert!(state.scan_examples(dir.path()).is_none());
        assert!(state.selected_example.is_none());
        match &state.listing {
            Some(ExampleListing::Empty(e)) => assert!(e.is_warning()),
            other => panic!("unexpected listing {other:?}"),
        }
        assert_eq!(state.start_run().unwrap_err(), InteractionError::NoImageSelected);
    }

    #[test]
    fn test_first_example_is_preselected() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png");
        write_png(dir.path(), "a.png");
        let mut state = DemoState::default();
        state.set_source(ImageSource::Example);

        let path = state.scan_examples(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("a.png"));
        assert_eq!(state.selected_example.as_deref(), Some("a.png"));

        let loaded = load_image(&path).unwrap();
        state.image_loaded(ImageSource::Example, Ok(loaded));
        assert!(state.start_run().unwrap().is_some());
    }

    #[test]
    fn test_stale_example_load_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png");
        write_png(dir.path(), "b.png");
        let mut state = DemoState::default();
        state.set_source(ImageSource::Example);
        state.scan_examples(dir.path());
        state.select_example("b.png".into());

        state.image_loaded(ImageSource::Example, Ok(image("a.png")));
        assert!(state.example_image.is_none());
    }

    #[test]
    fn test_unknown_example_is_not_selected() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png");
        let mut state = DemoState::default();
        state.scan_examples(dir.path());
        assert!(state.select_example("../secret.png".into()).is_none());
        assert_eq!(state.selected_example.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            load_image(&path),
            Err(InteractionError::UnreadableImage(_))
        ));
    }
}
