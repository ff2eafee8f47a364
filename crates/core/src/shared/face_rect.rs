/// Axis-aligned face bounding box in pixel coordinates.
///
/// Coordinates are signed so rectangles reported partly outside the
/// image survive until drawing, where they are clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether any part of the rectangle falls inside a `width` x `height` image.
    pub fn intersects_image(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && self.right() > 0
            && self.bottom() > 0
            && self.x < width as i32
            && self.y < height as i32
    }
}

impl std::fmt::Display for FaceRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_edges() {
        let r = FaceRect::new(50, 50, 100, 80);
        assert_eq!(r.right(), 150);
        assert_eq!(r.bottom(), 130);
    }

    #[test]
    fn test_area() {
        assert_eq!(FaceRect::new(0, 0, 30, 40).area(), 1200);
    }

    #[test]
    fn test_negative_size_has_zero_area() {
        let r = FaceRect::new(0, 0, -5, 10);
        assert_eq!(r.area(), 0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(FaceRect::new(1, 2, 3, 4).to_string(), "(1, 2, 3x4)");
    }

    #[rstest]
    #[case::inside(FaceRect::new(10, 10, 20, 20), true)]
    #[case::overlapping_left(FaceRect::new(-10, 10, 20, 20), true)]
    #[case::left_of_image(FaceRect::new(-30, 10, 20, 20), false)]
    #[case::touching_right_edge(FaceRect::new(100, 10, 20, 20), false)]
    #[case::below_image(FaceRect::new(10, 100, 20, 20), false)]
    #[case::empty(FaceRect::new(10, 10, 0, 20), false)]
    fn test_intersects_image(#[case] rect: FaceRect, #[case] expected: bool) {
        assert_eq!(rect.intersects_image(100, 100), expected);
    }
}
