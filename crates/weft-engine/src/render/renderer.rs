use crate::coords::Viewport;
use crate::paint::Color;
use crate::raster::{Camera, LineMode};
use crate::scene::{DrawBatch, RenderStage};

use super::shapes::{ExplicitRectCircleRenderer, LineRenderer, RectCircleRenderer};
use super::{CameraUniforms, RenderCtx, RenderTarget};

/// All instance renderers plus the camera, driven by a [`DrawBatch`] per frame.
pub struct Renderer {
    camera: CameraUniforms,
    shapes: RectCircleRenderer,
    overlay: ExplicitRectCircleRenderer,
    lines: LineRenderer,
    viewport: Viewport,
    clear_color: Color,
}

/// Construction options for [`Renderer`].
#[derive(Debug, Copy, Clone)]
pub struct RendererOptions {
    pub camera: Camera,
    pub line_mode: LineMode,
    pub clear_color: Color,
    /// Whether the device can bind a read-write `rgba32float` storage texture.
    pub read_write_storage: bool,
}

impl Renderer {
    pub fn new(ctx: &RenderCtx<'_>, options: RendererOptions) -> Self {
        Self {
            camera: CameraUniforms::new(ctx.device, options.camera, ctx.viewport),
            shapes: RectCircleRenderer::new(ctx),
            overlay: ExplicitRectCircleRenderer::new(ctx),
            lines: LineRenderer::new(ctx, options.line_mode, options.read_write_storage),
            viewport: ctx.viewport,
            clear_color: options.clear_color,
        }
    }

    #[inline]
    pub fn camera(&self) -> &CameraUniforms {
        &self.camera
    }

    pub fn set_camera(&mut self, queue: &wgpu::Queue, camera: Camera) {
        self.camera.set_camera(queue, camera);
    }

    #[inline]
    pub fn line_mode(&self) -> LineMode {
        self.lines.mode()
    }

    pub fn set_use_line_alpha(&mut self, queue: &wgpu::Queue, use_alpha: bool) {
        self.lines.set_use_alpha(queue, use_alpha);
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Follows a target resize: aspect uniform and accumulation texture.
    pub fn resize(&mut self, ctx: &RenderCtx<'_>) {
        if !ctx.viewport.is_valid() {
            return;
        }
        self.viewport = ctx.viewport;
        self.camera.update_aspect(ctx.queue, ctx.viewport);
        self.lines.resize(ctx);
    }

    /// Uploads the batch's instance data.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, batch: &DrawBatch) {
        self.shapes.set_instances(ctx, batch.shapes());
        self.lines.set_instances(ctx, batch.lines());
        self.overlay.set_instances(ctx, batch.overlay());
    }

    /// Clears the accumulation texture, then records one pass that clears `target` and
    /// draws each stage of `batch` in order. Call [`prepare`](Self::prepare) first.
    pub fn render(&self, target: &mut RenderTarget<'_>, batch: &DrawBatch) {
        self.lines.clear_accumulation(target.encoder);

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("weft frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for &stage in batch.stages() {
            match stage {
                RenderStage::Shapes => self.shapes.draw(&mut pass, &self.camera),
                RenderStage::Lines => self.lines.draw(&mut pass, &self.camera),
                RenderStage::Overlay => self.overlay.draw(&mut pass),
            }
        }
    }
}
