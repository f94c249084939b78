use super::Vec2;

/// Axis-aligned box in world space, stored as min/max corners.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` extending `half_extents` along each axis.
    ///
    /// Negative half-extents are folded, so the result is always normalized.
    #[inline]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        let h = Vec2::new(half_extents.x.abs(), half_extents.y.abs());
        Self::new(center - h, center + h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(x0: f32, y0: f32, x1: f32, y1: f32) -> Bounds {
        Bounds::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_center_spans_both_directions() {
        let bounds = Bounds::from_center(Vec2::new(1.0, -1.0), Vec2::new(2.0, 0.5));
        assert_eq!(bounds, b(-1.0, -1.5, 3.0, -0.5));
    }

    #[test]
    fn from_center_folds_negative_extents() {
        let bounds = Bounds::from_center(Vec2::ZERO, Vec2::new(-2.0, -1.0));
        assert_eq!(bounds, b(-2.0, -1.0, 2.0, 1.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_min_inclusive_max_exclusive() {
        let bounds = b(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains(Vec2::new(0.0, 0.0)));
        assert!(bounds.contains(Vec2::new(5.0, 5.0)));
        assert!(!bounds.contains(Vec2::new(10.0, 10.0)));
        assert!(!bounds.contains(Vec2::new(-1.0, 5.0)));
    }
}
