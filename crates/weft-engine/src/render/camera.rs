use crate::coords::{Vec2, Viewport};
use crate::raster::{Camera, CameraTransform};

/// Camera + aspect uniforms, bound as group 1 (binding 0 camera, binding 1 aspect).
pub struct CameraUniforms {
    camera: Camera,
    aspect: Vec2,

    camera_ubo: wgpu::Buffer,
    aspect_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CameraUniforms {
    pub fn new(device: &wgpu::Device, camera: Camera, viewport: Viewport) -> Self {
        let aspect = viewport.aspect_transform();

        let camera_ubo = Self::create_uniform(device, "weft camera ubo", bytemuck::bytes_of(&camera));
        let aspect_ubo = Self::create_uniform(device, "weft aspect ubo", bytemuck::bytes_of(&aspect));

        let layout = Self::create_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("weft camera bind group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: aspect_ubo.as_entire_binding(),
                },
            ],
        });

        Self {
            camera,
            aspect,
            camera_ubo,
            aspect_ubo,
            bind_group,
        }
    }

    fn create_uniform(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Layout for pipelines that read the camera. Structurally identical layouts are
    /// compatible, so each pipeline may create its own.
    pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let uniform = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("weft camera bgl"),
            entries: &[uniform(0), uniform(1)],
        })
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn aspect(&self) -> Vec2 {
        self.aspect
    }

    pub fn set_camera(&mut self, queue: &wgpu::Queue, camera: Camera) {
        if camera == self.camera {
            return;
        }
        self.camera = camera;
        queue.write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&camera));
    }

    /// Recomputes the aspect transform for a new target size.
    pub fn update_aspect(&mut self, queue: &wgpu::Queue, viewport: Viewport) {
        let aspect = viewport.aspect_transform();
        if aspect == self.aspect {
            return;
        }
        self.aspect = aspect;
        queue.write_buffer(&self.aspect_ubo, 0, bytemuck::bytes_of(&aspect));
    }

    /// CPU mirror of what the shaders see.
    #[inline]
    pub fn transform(&self) -> CameraTransform {
        CameraTransform::new(self.camera, self.aspect)
    }

    pub fn screen_to_world(&self, pixel: Vec2, viewport: Viewport) -> Option<Vec2> {
        self.transform().screen_to_world(pixel, viewport)
    }

    pub fn bind_to(&self, pass: &mut wgpu::RenderPass<'_>, index: u32) {
        pass.set_bind_group(index, &self.bind_group, &[]);
    }
}
