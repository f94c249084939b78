use crate::raster::ShapeInstance;
use crate::render::shaders::ShaderKind;
use crate::render::{DynamicStorageBuffer, RenderCtx};

use super::common::{
    corner_layout, create_corner_vbo, create_pipeline, create_quad_ibo, PipelineSpec,
    QUAD_INDEX_COUNT,
};

/// Rect/circle renderer fed explicit unit-quad corners from a vertex buffer.
///
/// No camera: instance offsets and sizes are taken as clip-space values, so this
/// suits overlays that must not move with the world.
pub struct ExplicitRectCircleRenderer {
    pipeline: wgpu::RenderPipeline,
    corner_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    instances: DynamicStorageBuffer<ShapeInstance>,
}

impl ExplicitRectCircleRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let instances = DynamicStorageBuffer::new(ctx.device, "weft overlay instances");
        let shader = ShaderKind::RectCircleVertex.create_module(ctx.device);

        let pipeline = create_pipeline(
            ctx.device,
            PipelineSpec {
                label: "weft overlay pipeline",
                shader: &shader,
                bind_group_layouts: &[instances.bind_group_layout()],
                vertex_buffers: &[corner_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.surface_format,
            },
        );

        Self {
            pipeline,
            corner_vbo: create_corner_vbo(ctx.device, "weft overlay corner vbo"),
            quad_ibo: create_quad_ibo(ctx.device, "weft overlay quad ibo"),
            instances,
        }
    }

    pub fn set_instances(&mut self, ctx: &RenderCtx<'_>, instances: &[ShapeInstance]) {
        self.instances.set_data(ctx.device, ctx.queue, instances);
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instances.is_empty() {
            log::trace!("overlay: nothing to draw");
            return;
        }

        pass.set_pipeline(&self.pipeline);
        self.instances.bind_to(pass, 0);
        pass.set_vertex_buffer(0, self.corner_vbo.slice(..));
        pass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..self.instances.len());
    }
}
