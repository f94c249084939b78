use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};

/// Camera uniform: `aim` is the world point shown at the center of the target.
///
/// Layout matches WGSL `struct Camera { aim: vec2<f32>, zoom: f32 }` (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Camera {
    pub aim: Vec2,
    pub zoom: f32,
    _pad: u32,
}

impl Camera {
    #[inline]
    pub const fn new(aim: Vec2, zoom: f32) -> Self {
        Self { aim, zoom, _pad: 0 }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

/// Camera plus the per-axis aspect correction, i.e. everything the vertex stages read
/// from uniforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraTransform {
    pub camera: Camera,
    pub aspect: Vec2,
}

impl CameraTransform {
    #[inline]
    pub const fn new(camera: Camera, aspect: Vec2) -> Self {
        Self { camera, aspect }
    }

    /// No offset, no zoom, no aspect correction: world space is clip space.
    pub const IDENTITY: Self = Self::new(Camera::new(Vec2::ZERO, 1.0), Vec2::ONE);

    #[inline]
    pub fn for_viewport(camera: Camera, viewport: Viewport) -> Self {
        Self::new(camera, viewport.aspect_transform())
    }

    /// `(world - aim) * zoom * aspect`.
    #[inline]
    pub fn world_to_clip(&self, world: Vec2) -> Vec2 {
        ((world - self.camera.aim) * self.camera.zoom).mul_elem(self.aspect)
    }

    /// Inverse of [`world_to_clip`](Self::world_to_clip).
    ///
    /// `None` when the transform collapses an axis (`zoom == 0` or a zero aspect
    /// component).
    pub fn clip_to_world(&self, clip: Vec2) -> Option<Vec2> {
        if !self.is_invertible() {
            return None;
        }
        Some(clip.div_elem(self.aspect) / self.camera.zoom + self.camera.aim)
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.camera.zoom != 0.0 && self.aspect.x != 0.0 && self.aspect.y != 0.0
    }

    /// World position under a screen pixel position (top-left origin).
    pub fn screen_to_world(&self, pixel: Vec2, viewport: Viewport) -> Option<Vec2> {
        self.clip_to_world(viewport.pixel_to_ndc(pixel))
    }

    /// Screen pixel position of a world point.
    pub fn world_to_screen(&self, world: Vec2, viewport: Viewport) -> Vec2 {
        viewport.ndc_to_pixel(self.world_to_clip(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn uniform_layout_is_16_bytes() {
        assert_eq!(std::mem::size_of::<Camera>(), 16);
    }

    #[test]
    fn world_to_clip_subtracts_aim_then_scales() {
        let t = CameraTransform::new(Camera::new(Vec2::new(1.0, 2.0), 2.0), Vec2::new(0.5, 1.0));
        assert_eq!(t.world_to_clip(Vec2::new(3.0, 1.0)), Vec2::new(2.0, -2.0));
        assert_eq!(t.world_to_clip(Vec2::new(1.0, 2.0)), Vec2::ZERO);
    }

    #[test]
    fn round_trip_through_clip_space() {
        let t = CameraTransform::new(Camera::new(Vec2::new(3.0, -2.0), 2.5), Vec2::new(0.625, 1.0));
        for world in [Vec2::new(1.25, 4.0), Vec2::ZERO, Vec2::new(-7.5, 0.125)] {
            let back = t.clip_to_world(t.world_to_clip(world)).unwrap();
            assert!(approx(back, world), "{back:?} != {world:?}");
        }
    }

    #[test]
    fn zero_zoom_is_not_invertible() {
        let t = CameraTransform::new(Camera::new(Vec2::ZERO, 0.0), Vec2::ONE);
        assert!(t.clip_to_world(Vec2::ZERO).is_none());
    }

    #[test]
    fn screen_center_maps_to_aim() {
        let viewport = Viewport::new(1600.0, 1000.0);
        let camera = Camera::new(Vec2::new(0.25, -0.5), 4.0);
        let t = CameraTransform::for_viewport(camera, viewport);
        let world = t.screen_to_world(Vec2::new(800.0, 500.0), viewport).unwrap();
        assert!(approx(world, camera.aim));
        assert!(approx(t.world_to_screen(camera.aim, viewport), Vec2::new(800.0, 500.0)));
    }
}
