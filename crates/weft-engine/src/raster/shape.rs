//! Rect/circle instances and the shape rasterizer stages.
//!
//! One record type covers both shapes. On the wire the kind is carried by a sentinel:
//! `size.y == 0` means "circle of radius `size.x`", anything else is a rectangle with
//! half-extents `size`. The Rust API goes through [`Shape`] instead, which refuses to
//! encode the one rectangle the sentinel cannot express (zero height).

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Bounds, Vec2};
use crate::paint::Color;

use super::camera::CameraTransform;
use super::unit_quad::unit_quad_corner;
use super::{ClipVertex, Fragment};

/// Shape kind with its geometric payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Half-extents: the full rectangle is `2 * half_extents` wide/high.
    Rect { half_extents: Vec2 },
}

impl Shape {
    /// Encodes into the wire `size` field.
    pub fn encode(self) -> Result<Vec2, ShapeError> {
        match self {
            Shape::Circle { radius } => {
                if !radius.is_finite() {
                    return Err(ShapeError::NonFinite);
                }
                Ok(Vec2::new(radius, 0.0))
            }
            Shape::Rect { half_extents } => {
                if !half_extents.is_finite() {
                    return Err(ShapeError::NonFinite);
                }
                if half_extents.y == 0.0 {
                    return Err(ShapeError::ZeroHeightRect);
                }
                Ok(half_extents)
            }
        }
    }

    /// Reads a wire `size` field. Total: a zero `y` is always a circle.
    #[inline]
    pub fn decode(size: Vec2) -> Shape {
        if size.y == 0.0 {
            Shape::Circle { radius: size.x }
        } else {
            Shape::Rect { half_extents: size }
        }
    }
}

/// Reasons a [`Shape`] cannot be encoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// `half_extents.y == 0` collides with the circle sentinel.
    ZeroHeightRect,
    NonFinite,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::ZeroHeightRect => {
                write!(f, "rectangle has zero height, which encodes as a circle")
            }
            ShapeError::NonFinite => write!(f, "shape dimensions must be finite"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Shape instance record, 32 bytes.
///
///  offset  0  offset  [f32; 2]
///  offset  8  size    [f32; 2]   (.y == 0 → circle of radius .x)
///  offset 16  color   [f32; 3]   linear RGB, always drawn opaque
///  offset 28  padding
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    pub offset: Vec2,
    pub size: Vec2,
    pub color: [f32; 3],
    _pad: u32,
}

impl ShapeInstance {
    /// Raw wire record; no validation.
    #[inline]
    pub const fn from_raw(offset: Vec2, size: Vec2, color: [f32; 3]) -> Self {
        Self { offset, size, color, _pad: 0 }
    }

    #[inline]
    pub const fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        Self::from_raw(center, Vec2::new(radius, 0.0), color.to_rgb())
    }

    pub fn rect(center: Vec2, half_extents: Vec2, color: Color) -> Result<Self, ShapeError> {
        Self::new(center, Shape::Rect { half_extents }, color)
    }

    pub fn new(center: Vec2, shape: Shape, color: Color) -> Result<Self, ShapeError> {
        if !center.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        Ok(Self::from_raw(center, shape.encode()?, color.to_rgb()))
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::decode(self.size)
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        self.size.y == 0.0
    }

    /// Scale applied to the unit quad. Circles use `(r, r)` so the quad stays square.
    #[inline]
    pub fn quad_scale(&self) -> Vec2 {
        if self.is_circle() {
            Vec2::splat(self.size.x)
        } else {
            self.size
        }
    }

    /// World-space extent of the rasterized quad.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.offset, self.quad_scale())
    }

    /// Places a unit-quad corner in world space.
    #[inline]
    pub fn place_corner(&self, corner: Vec2) -> Vec2 {
        corner.mul_elem(self.quad_scale()) + self.offset
    }
}

/// Record at `index`, or a zeroed one (a zero-radius circle, covering nothing) when out
/// of range.
#[inline]
pub fn fetch(instances: &[ShapeInstance], index: u32) -> ShapeInstance {
    instances.get(index as usize).copied().unwrap_or_default()
}

/// Vertex stage, camera variant: procedural unit-quad corner, world placement, camera.
pub fn vertex(
    instances: &[ShapeInstance],
    vertex_index: u32,
    instance_index: u32,
    camera: &CameraTransform,
) -> ClipVertex {
    let instance = fetch(instances, instance_index);
    let world = instance.place_corner(unit_quad_corner(vertex_index));
    let clip = camera.world_to_clip(world);

    ClipVertex {
        clip_position: [clip.x, clip.y, 0.0, 1.0],
        world_position: world,
        instance_index,
    }
}

/// Vertex stage, explicit-vertex variant: the caller supplies the corner and positions
/// are already in clip space, so no camera is applied.
pub fn vertex_explicit(
    instances: &[ShapeInstance],
    corner: Vec2,
    instance_index: u32,
) -> ClipVertex {
    let instance = fetch(instances, instance_index);
    let world = instance.place_corner(corner);

    ClipVertex {
        clip_position: [world.x, world.y, 0.0, 1.0],
        world_position: world,
        instance_index,
    }
}

/// Pixel stage. Re-fetches the instance so the discard test sees exactly the record the
/// vertex stage placed.
pub fn fragment(
    instances: &[ShapeInstance],
    world_position: Vec2,
    instance_index: u32,
) -> Fragment {
    let instance = fetch(instances, instance_index);

    if instance.is_circle() {
        let radius = instance.size.x;
        let dist_sqr = (world_position - instance.offset).length_squared();
        if dist_sqr > radius * radius {
            return Fragment::Discard;
        }
    }

    let [r, g, b] = instance.color;
    Fragment::Color([r, g, b, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Camera;

    fn red_rect() -> ShapeInstance {
        ShapeInstance::from_raw(Vec2::ZERO, Vec2::new(2.0, 1.0), [1.0, 0.0, 0.0])
    }

    // ── encoding ──────────────────────────────────────────────────────────

    #[test]
    fn record_is_32_bytes() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 32);
    }

    #[test]
    fn circle_encodes_with_zero_height_sentinel() {
        let c = ShapeInstance::circle(Vec2::new(1.0, 2.0), 3.0, Color::RED);
        assert_eq!(c.size, Vec2::new(3.0, 0.0));
        assert_eq!(c.shape(), Shape::Circle { radius: 3.0 });
        assert!(c.is_circle());
    }

    #[test]
    fn zero_height_rect_is_rejected() {
        let err = ShapeInstance::rect(Vec2::ZERO, Vec2::new(4.0, 0.0), Color::RED).unwrap_err();
        assert_eq!(err, ShapeError::ZeroHeightRect);
    }

    #[test]
    fn raw_zero_height_record_decodes_as_circle() {
        let raw = ShapeInstance::from_raw(Vec2::ZERO, Vec2::new(4.0, 0.0), [1.0; 3]);
        assert_eq!(raw.shape(), Shape::Circle { radius: 4.0 });
    }

    #[test]
    fn non_finite_dimensions_are_rejected() {
        let shape = Shape::Rect { half_extents: Vec2::new(f32::NAN, 1.0) };
        assert_eq!(shape.encode(), Err(ShapeError::NonFinite));
        assert_eq!(
            ShapeInstance::new(Vec2::new(f32::INFINITY, 0.0), Shape::Circle { radius: 1.0 }, Color::RED),
            Err(ShapeError::NonFinite)
        );
    }

    // ── vertex stage ──────────────────────────────────────────────────────

    #[test]
    fn circle_quad_is_square_regardless_of_radius_axis() {
        let c = ShapeInstance::circle(Vec2::new(5.0, -1.0), 2.0, Color::WHITE);
        let corners: Vec<Vec2> = (0..4)
            .map(|v| vertex(&[c], v, 0, &CameraTransform::IDENTITY).world_position)
            .collect();
        assert_eq!(corners[0], Vec2::new(7.0, 1.0));
        assert_eq!(corners[2], Vec2::new(3.0, -3.0));
        assert_eq!(c.bounds(), Bounds::new(Vec2::new(3.0, -3.0), Vec2::new(7.0, 1.0)));
    }

    #[test]
    fn rect_quad_uses_half_extents() {
        let v = vertex(&[red_rect()], 1, 0, &CameraTransform::IDENTITY);
        assert_eq!(v.world_position, Vec2::new(-2.0, 1.0));
        assert_eq!(v.clip_position, [-2.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn camera_applies_to_clip_but_not_world_position() {
        let camera = CameraTransform::new(Camera::new(Vec2::new(1.0, 0.0), 0.5), Vec2::new(0.5, 1.0));
        let v = vertex(&[red_rect()], 0, 0, &camera);
        assert_eq!(v.world_position, Vec2::new(2.0, 1.0));
        assert_eq!(v.clip_position, [0.25, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn instance_index_passes_through_flat() {
        let instances = [red_rect(), ShapeInstance::circle(Vec2::ONE, 1.0, Color::BLUE)];
        for vi in 0..4 {
            assert_eq!(vertex(&instances, vi, 1, &CameraTransform::IDENTITY).instance_index, 1);
        }
    }

    #[test]
    fn out_of_range_vertex_collapses_to_offset() {
        let v = vertex(&[red_rect()], 9, 0, &CameraTransform::IDENTITY);
        assert_eq!(v.world_position, Vec2::ZERO);
    }

    #[test]
    fn explicit_variant_skips_camera() {
        let v = vertex_explicit(&[red_rect()], Vec2::new(-1.0, -1.0), 0);
        assert_eq!(v.world_position, Vec2::new(-2.0, -1.0));
        assert_eq!(v.clip_position, [-2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn explicit_and_procedural_agree_without_camera() {
        let c = ShapeInstance::circle(Vec2::new(0.5, 0.5), 0.25, Color::GREEN);
        for vi in 0..4 {
            let a = vertex(&[c], vi, 0, &CameraTransform::IDENTITY);
            let b = vertex_explicit(&[c], unit_quad_corner(vi), 0);
            assert_eq!(a, b);
        }
    }

    // ── pixel stage ───────────────────────────────────────────────────────

    #[test]
    fn circle_keeps_inside_and_discards_outside() {
        let c = [ShapeInstance::circle(Vec2::ZERO, 3.0, Color::WHITE)];
        assert_eq!(fragment(&c, Vec2::new(2.0, 2.0), 0), Fragment::Color([1.0, 1.0, 1.0, 1.0]));
        assert!(fragment(&c, Vec2::new(3.0, 3.0), 0).is_discard());
    }

    #[test]
    fn circle_boundary_is_inclusive() {
        let c = [ShapeInstance::circle(Vec2::new(1.0, 1.0), 3.0, Color::WHITE)];
        assert!(!fragment(&c, Vec2::new(4.0, 1.0), 0).is_discard());
        assert!(!fragment(&c, Vec2::new(1.0, -2.0), 0).is_discard());
        assert!(fragment(&c, Vec2::new(4.0, 1.0 + 1e-2), 0).is_discard());
    }

    #[test]
    fn rect_never_discards_inside_its_quad() {
        let r = [red_rect()];
        let bounds = r[0].bounds();
        for ix in 0..=8 {
            for iy in 0..=8 {
                let p = Vec2::new(
                    bounds.min.x + (bounds.max.x - bounds.min.x) * ix as f32 / 8.0,
                    bounds.min.y + (bounds.max.y - bounds.min.y) * iy as f32 / 8.0,
                );
                assert_eq!(fragment(&r, p, 0), Fragment::Color([1.0, 0.0, 0.0, 1.0]));
            }
        }
    }

    #[test]
    fn rect_scenario_inside_and_outside_quad() {
        let r = red_rect();
        assert!(r.bounds().contains(Vec2::new(1.5, 0.0)));
        assert_eq!(fragment(&[r], Vec2::new(1.5, 0.0), 0), Fragment::Color([1.0, 0.0, 0.0, 1.0]));
        assert!(!r.bounds().contains(Vec2::new(2.5, 0.0)));
    }

    #[test]
    fn alpha_is_always_opaque() {
        let c = ShapeInstance::circle(Vec2::ZERO, 1.0, Color::RED.with_alpha(0.1));
        assert_eq!(fragment(&[c], Vec2::ZERO, 0).color().map(|c| c[3]), Some(1.0));
    }

    #[test]
    fn missing_instance_covers_nothing() {
        let v = vertex(&[], 0, 3, &CameraTransform::IDENTITY);
        assert_eq!(v.world_position, Vec2::ZERO);
        assert!(fetch(&[], 3).is_circle());
    }
}
