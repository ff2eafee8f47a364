//! Haar cascade face detection wrapped for interactive demonstration.
//!
//! The crate is laid out by concern, each with a `domain` layer (traits and
//! plain types) and an `infrastructure` layer (adapters over `image`,
//! `imageproc` and OpenCV):
//!
//! - [`detection`]: scan parameters, the [`FaceDetector`](detection::domain::face_detector::FaceDetector)
//!   seam and the OpenCV cascade backend.
//! - [`annotation`]: burning detected rectangles into a frame.
//! - [`imaging`]: decoding, encoding and the example image gallery.
//! - [`pipeline`]: the detect-and-annotate use case and the user-facing report.

pub mod annotation;
pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod shared;
