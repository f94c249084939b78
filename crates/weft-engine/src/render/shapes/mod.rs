//! Instance renderers. Each owns its pipeline and instance storage and records into a
//! render pass the caller opened.

mod common;
mod lines;
mod rect_circle;
mod rect_circle_vertex;

pub use lines::{LineRenderer, ACCUM_FORMAT};
pub use rect_circle::RectCircleRenderer;
pub use rect_circle_vertex::ExplicitRectCircleRenderer;
