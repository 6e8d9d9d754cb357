/// Drawable size of a window in physical pixels.
///
/// The renderer derives the projection aspect ratio from this on every draw.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height. A degenerate viewport (minimized window) reports 1.
    #[inline]
    pub fn aspect(self) -> f32 {
        if !self.is_valid() {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        assert_eq!(Viewport::new(800, 400).aspect(), 2.0);
        assert_eq!(Viewport::new(600, 800).aspect(), 0.75);
    }

    #[test]
    fn zero_height_reports_unit_aspect() {
        assert_eq!(Viewport::new(800, 0).aspect(), 1.0);
        assert!(!Viewport::new(0, 10).is_valid());
    }
}
