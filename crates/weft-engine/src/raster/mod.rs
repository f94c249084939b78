//! Rasterization and compositing core, CPU side.
//!
//! Every function here mirrors one shader stage in `render/shaders/` and has the same
//! semantics, bit for bit where the arithmetic allows:
//!
//! - [`unit_quad_corner`]: the procedural quad used by the camera shape pipeline
//! - [`shape`]: rect/circle vertex + pixel stages (camera and explicit-vertex variants)
//! - [`line`]: line vertex + pixel stages, direct or accumulating
//! - [`accum`]: the accumulation formula and a CPU accumulation image
//! - [`SoftwareTarget`]: a small framebuffer that drives the stages end to end
//!
//! Instance records ([`ShapeInstance`], [`LineInstance`]) and the [`Camera`] uniform are
//! `Pod` and are uploaded to the GPU unchanged.

pub mod accum;
pub mod line;
pub mod shape;

mod camera;
mod software;
mod unit_quad;

pub use accum::AccumulationBuffer;
pub use camera::{Camera, CameraTransform};
pub use line::{LineInstance, LineMode};
pub use shape::{Shape, ShapeError, ShapeInstance};
pub use software::SoftwareTarget;
pub use unit_quad::{unit_quad_corner, UNIT_QUAD_CORNERS, UNIT_QUAD_INDICES};

use crate::coords::Vec2;

/// Output of a vertex stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipVertex {
    /// Clip-space position (`z = 0`, `w = 1`).
    pub clip_position: [f32; 4],
    /// Position before the camera transform. Interpolated across the primitive.
    pub world_position: Vec2,
    /// Flat: constant over the whole primitive.
    pub instance_index: u32,
}

impl ClipVertex {
    #[inline]
    pub fn clip_xy(&self) -> Vec2 {
        Vec2::new(self.clip_position[0], self.clip_position[1])
    }
}

/// Outcome of a pixel stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fragment {
    Color([f32; 4]),
    /// No color and no attachment write.
    Discard,
}

impl Fragment {
    #[inline]
    pub fn is_discard(&self) -> bool {
        matches!(self, Fragment::Discard)
    }

    #[inline]
    pub fn color(&self) -> Option<[f32; 4]> {
        match self {
            Fragment::Color(c) => Some(*c),
            Fragment::Discard => None,
        }
    }
}
