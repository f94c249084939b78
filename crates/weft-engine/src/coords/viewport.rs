use super::Vec2;

/// Render target size in physical pixels.
///
/// The camera's aspect transform and the screen-to-world mapping are both derived
/// from this.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Per-axis scale that keeps world units square on a non-square target.
    ///
    /// The shorter axis spans NDC `[-1, 1]` at zoom 1; the longer one is squeezed.
    /// A degenerate viewport yields the identity.
    pub fn aspect_transform(self) -> Vec2 {
        if !self.is_valid() {
            return Vec2::ONE;
        }
        let min_dim = self.width.min(self.height);
        Vec2::new(min_dim / self.width, min_dim / self.height)
    }

    /// Maps a screen pixel position (top-left origin, +Y down) to NDC (+Y up).
    #[inline]
    pub fn pixel_to_ndc(self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * pixel.x / self.width - 1.0,
            1.0 - 2.0 * pixel.y / self.height,
        )
    }

    /// Inverse of [`pixel_to_ndc`](Self::pixel_to_ndc).
    #[inline]
    pub fn ndc_to_pixel(self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}
