use std::fmt;

/// One renderer's slot in the frame's draw order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RenderStage {
    /// World-space rects and circles, under the camera.
    Shapes,
    /// World-space lines, under the camera.
    Lines,
    /// Clip-space rects and circles, unaffected by the camera.
    Overlay,
}

impl RenderStage {
    /// Order used when a batch queues no stages.
    pub const DEFAULT_ORDER: [RenderStage; 3] =
        [RenderStage::Shapes, RenderStage::Lines, RenderStage::Overlay];
}

/// Errors from building a [`DrawBatch`](super::DrawBatch).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Each stage may appear at most once per frame.
    DuplicateStage(RenderStage),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::DuplicateStage(stage) => {
                write!(f, "render stage {stage:?} is already queued")
            }
        }
    }
}

impl std::error::Error for BatchError {}
