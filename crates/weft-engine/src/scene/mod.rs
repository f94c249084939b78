//! Frame draw data.
//!
//! Responsibilities:
//! - collect instance records per renderer for one frame
//! - hold the caller-chosen stage order (no z-ordering)

mod batch;
mod stage;

pub use batch::DrawBatch;
pub use stage::{BatchError, RenderStage};
