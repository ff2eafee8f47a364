pub const CASCADE_MODEL_NAME: &str = "haarcascade_frontalface_default.xml";
pub const CASCADE_MODEL_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_frontalface_default.xml";

/// Extensions accepted for uploads and example images (compared lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Example directory, relative to the working directory.
pub const DEFAULT_EXAMPLES_DIR: &str = "imagens";

/// Outline color in RGB order (BGR `0,255,255`).
pub const HIGHLIGHT_COLOR: [u8; 3] = [255, 255, 0];
pub const OUTLINE_THICKNESS: u32 = 3;
