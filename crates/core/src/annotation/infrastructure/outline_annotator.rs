use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::annotation::domain::frame_annotator::{AnnotationError, FrameAnnotator};
use crate::shared::constants::{HIGHLIGHT_COLOR, OUTLINE_THICKNESS};
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Draws a rectangle outline around each face.
///
/// The outline is centred on the edges running from `(x, y)` to
/// `(x + w, y + h)` inclusive, so a 3 px stroke covers one pixel on
/// each side of the edge. Strokes falling outside the frame are clipped.
pub struct OutlineAnnotator {
    color: Rgb<u8>,
    thickness: u32,
}

impl OutlineAnnotator {
    pub fn new(color: [u8; 3], thickness: u32) -> Self {
        Self {
            color: Rgb(color),
            thickness: thickness.max(1),
        }
    }
}

impl Default for OutlineAnnotator {
    fn default() -> Self {
        Self::new(HIGHLIGHT_COLOR, OUTLINE_THICKNESS)
    }
}

impl FrameAnnotator for OutlineAnnotator {
    fn annotate(&self, frame: &mut Frame, faces: &[FaceRect]) -> Result<(), AnnotationError> {
        if !frame.is_rgb() {
            return Err(AnnotationError::UnsupportedChannels(frame.channels()));
        }
        let (width, height) = (frame.width(), frame.height());
        let mut canvas: ImageBuffer<Rgb<u8>, &mut [u8]> =
            ImageBuffer::from_raw(width, height, frame.data_mut())
                .ok_or(AnnotationError::MalformedFrame(width, height))?;

        for face in faces {
            for rect in stroke_rects(face, self.thickness) {
                draw_hollow_rect_mut(&mut canvas, rect, self.color);
            }
        }
        Ok(())
    }
}

/// One-pixel rectangles whose union forms a stroke of `thickness` pixels.
fn stroke_rects(face: &FaceRect, thickness: u32) -> Vec<Rect> {
    let outer = (thickness as i32 - 1) / 2;
    let inner = thickness as i32 - 1 - outer;
    // Edges are inclusive, so the outline spans w + 1 by h + 1 pixels.
    let span_w = face.width + 1;
    let span_h = face.height + 1;

    (-outer..=inner)
        .filter_map(|inset| {
            let w = span_w - 2 * inset;
            let h = span_h - 2 * inset;
            (w > 0 && h > 0)
                .then(|| Rect::at(face.x + inset, face.y + inset).of_size(w as u32, h as u32))
        })
        .collect()
}
