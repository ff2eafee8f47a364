use image::{GrayImage, Luma, RgbImage};

/// A still image: contiguous bytes in row-major order.
///
/// Either RGB (3 channels) or luminance (1 channel). Format conversion
/// happens at I/O boundaries only; the domain layer treats pixel data
/// as opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_rgb(&self) -> bool {
        self.channels == 3
    }

    pub fn is_luma(&self) -> bool {
        self.channels == 1
    }

    /// Copies the pixels into an [`RgbImage`]. `None` unless the frame is RGB.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        if !self.is_rgb() {
            return None;
        }
        RgbImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Single-channel luminance copy. Non-RGB frames are returned as-is.
    pub fn to_luma(&self) -> Frame {
        match self.to_rgb_image() {
            Some(rgb) => {
                let gray = GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                    let [r, g, b] = rgb.get_pixel(x, y).0;
                    Luma([bt601_luma(r, g, b)])
                });
                let (width, height) = gray.dimensions();
                Frame::new(gray.into_raw(), width, height, 1)
            }
            None => self.clone(),
        }
    }

    /// RGBA bytes for display surfaces that expect an alpha channel.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        match self.channels {
            1 => {
                for &v in &self.data {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
            }
            _ => {
                for px in self.data.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
        }
        out
    }
}

/// BT.601 luminance in 14-bit fixed point, rounded the way OpenCV's
/// `COLOR_RGB2GRAY` rounds. Haar cascades are trained on this weighting.
fn bt601_luma(r: u8, g: u8, b: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    let y = (r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14;
    y.min(255) as u8
}
