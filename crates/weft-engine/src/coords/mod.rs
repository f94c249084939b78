//! Coordinate and geometry types shared by the rasterization core and the renderers.
//!
//! World space:
//! - +X right, +Y up
//! - the camera maps `aim` to the center of the target
//!
//! Screen space is physical pixels, origin top-left, +Y down. Only the runtime and the
//! software target deal in screen pixels; everything uploaded to the GPU is world space.

mod bounds;
mod vec2;
mod viewport;

pub use bounds::Bounds;
pub use vec2::Vec2;
pub use viewport::Viewport;
