//! Line instances and the line compositor stages.

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

use super::accum::AccumulationBuffer;
use super::camera::CameraTransform;
use super::ClipVertex;

/// Line instance record, 32 bytes.
///
///  offset  0  start  [f32; 2]
///  offset  8  end    [f32; 2]
///  offset 16  color  [f32; 4]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: Vec2,
    pub end: Vec2,
    pub color: [f32; 4],
}

impl LineInstance {
    /// Stores `color` premultiplied (`rgb * a, a`).
    #[inline]
    pub fn new(start: Vec2, end: Vec2, color: Color) -> Self {
        Self::from_raw(start, end, color.premultiplied())
    }

    /// Stores `color` exactly as given.
    #[inline]
    pub const fn from_raw(start: Vec2, end: Vec2, color: [f32; 4]) -> Self {
        Self { start, end, color }
    }

    #[inline]
    pub fn endpoint(&self, vertex_index: u32) -> Vec2 {
        if vertex_index == 0 { self.start } else { self.end }
    }
}

/// How the pixel stage resolves a line's color. Mirrors the `use_alpha` uniform.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LineMode {
    /// Write the instance color unmodified.
    #[default]
    Direct,
    /// Composite through the accumulation texture.
    Accumulate,
}

impl LineMode {
    /// Any non-zero flag selects accumulation.
    #[inline]
    pub fn from_flag(use_alpha: u32) -> Self {
        if use_alpha > 0 { LineMode::Accumulate } else { LineMode::Direct }
    }

    #[inline]
    pub fn flag(self) -> u32 {
        match self {
            LineMode::Direct => 0,
            LineMode::Accumulate => 1,
        }
    }

    #[inline]
    pub fn from_bool(use_alpha: bool) -> Self {
        Self::from_flag(use_alpha as u32)
    }
}

#[inline]
pub fn fetch(instances: &[LineInstance], index: u32) -> LineInstance {
    instances.get(index as usize).copied().unwrap_or_default()
}

/// Vertex stage: `start` for vertex 0, `end` otherwise, then the camera.
pub fn vertex(
    instances: &[LineInstance],
    vertex_index: u32,
    instance_index: u32,
    camera: &CameraTransform,
) -> ClipVertex {
    let world = fetch(instances, instance_index).endpoint(vertex_index);
    let clip = camera.world_to_clip(world);

    ClipVertex {
        clip_position: [clip.x, clip.y, 0.0, 1.0],
        world_position: world,
        instance_index,
    }
}

/// Pixel stage for the fragment at integer pixel `(x, y)`.
///
/// In accumulate mode this is a non-atomic read-modify-write of `accum`; callers
/// serialize fragments in primitive order.
pub fn fragment(
    instances: &[LineInstance],
    instance_index: u32,
    (x, y): (u32, u32),
    mode: LineMode,
    accum: &mut AccumulationBuffer,
) -> [f32; 4] {
    let color = fetch(instances, instance_index).color;
    match mode {
        LineMode::Direct => color,
        LineMode::Accumulate => accum.composite(x, y, color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Camera;

    fn segment() -> LineInstance {
        LineInstance::from_raw(Vec2::new(-1.0, 0.5), Vec2::new(3.0, 0.5), [0.2, 0.4, 0.6, 0.5])
    }

    #[test]
    fn record_is_32_bytes() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 32);
    }

    #[test]
    fn new_premultiplies_raw_does_not() {
        let l = LineInstance::new(Vec2::ZERO, Vec2::ONE, Color::new(1.0, 0.5, 0.0, 0.5));
        assert_eq!(l.color, [0.5, 0.25, 0.0, 0.5]);

        let raw = LineInstance::from_raw(Vec2::ZERO, Vec2::ONE, [1.0, 0.5, 0.0, 0.5]);
        assert_eq!(raw.color, [1.0, 0.5, 0.0, 0.5]);
    }

    #[test]
    fn mode_flag_round_trip() {
        assert_eq!(LineMode::from_flag(0), LineMode::Direct);
        assert_eq!(LineMode::from_flag(1), LineMode::Accumulate);
        assert_eq!(LineMode::from_flag(7), LineMode::Accumulate);
        assert_eq!(LineMode::from_bool(true).flag(), 1);
        assert_eq!(LineMode::Direct.flag(), 0);
    }

    // ── vertex stage ──────────────────────────────────────────────────────

    #[test]
    fn vertex_selects_endpoints() {
        let l = [segment()];
        let cam = CameraTransform::IDENTITY;
        assert_eq!(vertex(&l, 0, 0, &cam).world_position, Vec2::new(-1.0, 0.5));
        assert_eq!(vertex(&l, 1, 0, &cam).world_position, Vec2::new(3.0, 0.5));
        assert_eq!(vertex(&l, 5, 0, &cam).world_position, Vec2::new(3.0, 0.5));
    }

    #[test]
    fn vertex_applies_camera() {
        let cam = CameraTransform::new(Camera::new(Vec2::new(1.0, 0.5), 0.5), Vec2::new(1.0, 0.5));
        let v = vertex(&[segment()], 1, 0, &cam);
        assert_eq!(v.clip_position, [1.0, 0.0, 0.0, 1.0]);
    }

    // ── pixel stage ───────────────────────────────────────────────────────

    #[test]
    fn direct_mode_passes_color_through() {
        let mut accum = AccumulationBuffer::new(4, 4);
        let out = fragment(&[segment()], 0, (1, 1), LineMode::Direct, &mut accum);
        assert_eq!(out, [0.2, 0.4, 0.6, 0.5]);
        assert_eq!(accum.get(1, 1), [0.0; 4]);
    }

    #[test]
    fn accumulate_mode_matches_two_line_scenario() {
        let lines = [
            LineInstance::from_raw(Vec2::ZERO, Vec2::ONE, [1.0, 0.0, 0.0, 0.5]),
            LineInstance::from_raw(Vec2::ZERO, Vec2::ONE, [0.0, 1.0, 0.0, 0.5]),
        ];
        let mut accum = AccumulationBuffer::new(4, 4);

        let first = fragment(&lines, 0, (2, 3), LineMode::Accumulate, &mut accum);
        assert_eq!(accum.get(2, 3), [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(first, [0.5, 0.0, 0.0, 1.0]);

        let second = fragment(&lines, 1, (2, 3), LineMode::Accumulate, &mut accum);
        assert_eq!(accum.get(2, 3), [0.5, 1.0, 0.0, 0.75]);
        assert_eq!(second, [0.375, 0.75, 0.0, 1.0]);
    }
}
