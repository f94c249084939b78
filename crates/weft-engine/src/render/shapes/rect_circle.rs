use crate::raster::ShapeInstance;
use crate::render::shaders::ShaderKind;
use crate::render::{CameraUniforms, DynamicStorageBuffer, RenderCtx};

use super::common::{create_pipeline, create_quad_ibo, PipelineSpec, QUAD_INDEX_COUNT};

/// Rect/circle renderer with a procedural unit quad and the camera transform.
///
/// Bindings: group 0 instances, group 1 camera. No vertex buffers; corners come from
/// `vertex_index` through a static `[0, 1, 2, 0, 2, 3]` index buffer.
pub struct RectCircleRenderer {
    pipeline: wgpu::RenderPipeline,
    quad_ibo: wgpu::Buffer,
    instances: DynamicStorageBuffer<ShapeInstance>,
}

impl RectCircleRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let instances = DynamicStorageBuffer::new(ctx.device, "weft rect/circle instances");
        let camera_layout = CameraUniforms::create_bind_group_layout(ctx.device);
        let shader = ShaderKind::RectCircle.create_module(ctx.device);

        let pipeline = create_pipeline(
            ctx.device,
            PipelineSpec {
                label: "weft rect/circle pipeline",
                shader: &shader,
                bind_group_layouts: &[instances.bind_group_layout(), &camera_layout],
                vertex_buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.surface_format,
            },
        );

        Self {
            pipeline,
            quad_ibo: create_quad_ibo(ctx.device, "weft rect/circle quad ibo"),
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

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera: &CameraUniforms) {
        if self.instances.is_empty() {
            log::trace!("rect/circle: nothing to draw");
            return;
        }

        pass.set_pipeline(&self.pipeline);
        self.instances.bind_to(pass, 0);
        camera.bind_to(pass, 1);
        pass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..self.instances.len());
    }
}
