use crate::raster::{LineInstance, LineMode};
use crate::render::shaders::ShaderKind;
use crate::render::{CameraUniforms, DynamicStorageBuffer, RenderCtx};

use super::common::{create_pipeline, PipelineSpec};

/// Format of the accumulation texture.
pub const ACCUM_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

/// Line renderer: one line-list primitive per instance, `draw(0..2, 0..N)`.
///
/// Bindings: group 0 instances, group 1 camera, group 2 accumulation texture and the
/// `use_alpha` flag. On devices without read-write `rgba32float` storage the pipeline is
/// built without group 2 and only [`LineMode::Direct`] is available.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    instances: DynamicStorageBuffer<LineInstance>,
    mode: LineMode,
    accum: Option<Accumulation>,
}

/// Accumulation resources. The texture matches the render target size.
struct Accumulation {
    layout: wgpu::BindGroupLayout,
    use_alpha_ubo: wgpu::Buffer,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
}

impl LineRenderer {
    /// Device features accumulate mode depends on.
    pub fn required_features() -> wgpu::Features {
        wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES
    }

    /// `read_write_storage` reports whether [`ACCUM_FORMAT`] can be bound read-write.
    pub fn new(ctx: &RenderCtx<'_>, mode: LineMode, read_write_storage: bool) -> Self {
        let instances = DynamicStorageBuffer::new(ctx.device, "weft line instances");
        let camera_layout = CameraUniforms::create_bind_group_layout(ctx.device);

        let accum = read_write_storage.then(|| Accumulation::new(ctx, mode));
        let mode = if accum.is_some() {
            mode
        } else {
            if mode == LineMode::Accumulate {
                log::warn!("read-write storage textures unavailable; lines drawn without accumulation");
            }
            LineMode::Direct
        };

        let (kind, layouts) = match &accum {
            Some(accum) => (
                ShaderKind::Lines,
                vec![instances.bind_group_layout(), &camera_layout, &accum.layout],
            ),
            None => (
                ShaderKind::LinesDirect,
                vec![instances.bind_group_layout(), &camera_layout],
            ),
        };
        let shader = kind.create_module(ctx.device);

        let pipeline = create_pipeline(
            ctx.device,
            PipelineSpec {
                label: "weft line pipeline",
                shader: &shader,
                bind_group_layouts: &layouts,
                vertex_buffers: &[],
                topology: wgpu::PrimitiveTopology::LineList,
                format: ctx.surface_format,
            },
        );

        Self {
            pipeline,
            instances,
            mode,
            accum,
        }
    }

    #[inline]
    pub fn mode(&self) -> LineMode {
        self.mode
    }

    #[inline]
    pub fn supports_accumulation(&self) -> bool {
        self.accum.is_some()
    }

    /// Switches between direct and accumulate mode. Accumulate is ignored (with a
    /// warning) when the device cannot support it.
    pub fn set_use_alpha(&mut self, queue: &wgpu::Queue, use_alpha: bool) {
        let Some(accum) = self.accum.as_ref() else {
            if use_alpha {
                log::warn!("line accumulation unsupported on this device");
            }
            return;
        };

        let mode = LineMode::from_bool(use_alpha);
        if mode != self.mode {
            queue.write_buffer(&accum.use_alpha_ubo, 0, bytemuck::bytes_of(&mode.flag()));
            self.mode = mode;
        }
    }

    /// Recreates the accumulation texture for a new target size.
    pub fn resize(&mut self, ctx: &RenderCtx<'_>) {
        if let Some(accum) = self.accum.as_mut() {
            accum.recreate_texture(ctx);
        }
    }

    /// Clears the accumulation texture to zero with a clear-only pass. A no-op in direct
    /// mode.
    pub fn clear_accumulation(&self, encoder: &mut wgpu::CommandEncoder) {
        if self.mode != LineMode::Accumulate {
            return;
        }
        let Some(accum) = self.accum.as_ref() else { return };

        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("weft accumulation clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &accum.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    pub fn set_instances(&mut self, ctx: &RenderCtx<'_>, instances: &[LineInstance]) {
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
            log::trace!("lines: nothing to draw");
            return;
        }

        pass.set_pipeline(&self.pipeline);
        self.instances.bind_to(pass, 0);
        camera.bind_to(pass, 1);
        if let Some(accum) = self.accum.as_ref() {
            pass.set_bind_group(2, &accum.bind_group, &[]);
        }
        pass.draw(0..2, 0..self.instances.len());
    }
}

impl Accumulation {
    fn new(ctx: &RenderCtx<'_>, mode: LineMode) -> Self {
        use wgpu::util::DeviceExt;

        let layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("weft accumulation bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::ReadWrite,
                        format: ACCUM_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let use_alpha_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("weft use_alpha ubo"),
            contents: bytemuck::bytes_of(&mode.flag()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let texture = Self::create_texture(ctx);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = Self::create_bind_group(ctx.device, &layout, &view, &use_alpha_ubo);

        Self {
            layout,
            use_alpha_ubo,
            texture,
            view,
            bind_group,
        }
    }

    fn create_texture(ctx: &RenderCtx<'_>) -> wgpu::Texture {
        let (width, height) = ctx.target_size();
        log::debug!("accumulation texture: {width}x{height}");

        ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("weft accumulation texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ACCUM_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        use_alpha_ubo: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("weft accumulation bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: use_alpha_ubo.as_entire_binding(),
                },
            ],
        })
    }

    fn recreate_texture(&mut self, ctx: &RenderCtx<'_>) {
        let (width, height) = ctx.target_size();
        let current = self.texture.size();
        if current.width == width && current.height == height {
            return;
        }

        self.texture = Self::create_texture(ctx);
        self.view = self.texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.bind_group =
            Self::create_bind_group(ctx.device, &self.layout, &self.view, &self.use_alpha_ubo);
    }
}
