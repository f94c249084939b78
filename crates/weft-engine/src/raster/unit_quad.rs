use crate::coords::Vec2;

/// Corners of the unit quad in draw order.
pub const UNIT_QUAD_CORNERS: [Vec2; 4] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
];

/// Two triangles over [`UNIT_QUAD_CORNERS`].
pub const UNIT_QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Corner `index` of the unit quad centered at the origin.
///
/// Indices outside `0..4` yield the zero vector; the vertex stage has no way to report
/// an error, so the function is total.
#[inline]
pub fn unit_quad_corner(index: u32) -> Vec2 {
    UNIT_QUAD_CORNERS
        .get(index as usize)
        .copied()
        .unwrap_or(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_in_winding_order() {
        assert_eq!(unit_quad_corner(0), Vec2::new(1.0, 1.0));
        assert_eq!(unit_quad_corner(1), Vec2::new(-1.0, 1.0));
        assert_eq!(unit_quad_corner(2), Vec2::new(-1.0, -1.0));
        assert_eq!(unit_quad_corner(3), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn out_of_range_is_zero() {
        for index in [4, 5, 17, u32::MAX] {
            assert_eq!(unit_quad_corner(index), Vec2::ZERO);
        }
    }

    #[test]
    fn indices_cover_every_corner() {
        let mut seen = [false; 4];
        for i in UNIT_QUAD_INDICES {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
