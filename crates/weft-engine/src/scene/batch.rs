use crate::raster::{LineInstance, ShapeInstance};

use super::{BatchError, RenderStage};

/// Everything drawn in one frame: instance data per renderer plus the stage order.
///
/// Draw order is caller-determined. Within a stage, instances draw in push order;
/// stages draw in the order they were queued, or [`RenderStage::DEFAULT_ORDER`] when
/// none were.
#[derive(Debug, Default, Clone)]
pub struct DrawBatch {
    shapes: Vec<ShapeInstance>,
    lines: Vec<LineInstance>,
    overlay: Vec<ShapeInstance>,
    stages: Vec<RenderStage>,
}

impl DrawBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears instances and stages. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.lines.clear();
        self.overlay.clear();
        self.stages.clear();
    }

    // ── stages ────────────────────────────────────────────────────────────

    /// Queues `stage` after the ones already queued.
    pub fn add_stage(&mut self, stage: RenderStage) -> Result<(), BatchError> {
        if self.stages.contains(&stage) {
            return Err(BatchError::DuplicateStage(stage));
        }
        self.stages.push(stage);
        Ok(())
    }

    /// Like [`add_stage`](Self::add_stage); returns whether the stage was added.
    #[inline]
    pub fn try_add_stage(&mut self, stage: RenderStage) -> bool {
        self.add_stage(stage).is_ok()
    }

    /// Stages in draw order.
    pub fn stages(&self) -> &[RenderStage] {
        if self.stages.is_empty() {
            &RenderStage::DEFAULT_ORDER
        } else {
            &self.stages
        }
    }

    // ── instances ─────────────────────────────────────────────────────────

    #[inline]
    pub fn push_shape(&mut self, shape: ShapeInstance) {
        self.shapes.push(shape);
    }

    #[inline]
    pub fn push_line(&mut self, line: LineInstance) {
        self.lines.push(line);
    }

    /// Adds a clip-space shape for the overlay stage.
    #[inline]
    pub fn push_overlay(&mut self, shape: ShapeInstance) {
        self.overlay.push(shape);
    }

    pub fn extend_shapes(&mut self, shapes: impl IntoIterator<Item = ShapeInstance>) {
        self.shapes.extend(shapes);
    }

    pub fn extend_lines(&mut self, lines: impl IntoIterator<Item = LineInstance>) {
        self.lines.extend(lines);
    }

    #[inline]
    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    #[inline]
    pub fn lines(&self) -> &[LineInstance] {
        &self.lines
    }

    #[inline]
    pub fn overlay(&self) -> &[ShapeInstance] {
        &self.overlay
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.lines.is_empty() && self.overlay.is_empty()
    }
}
