use crate::coords::Viewport;
use crate::device::GpuFrame;

/// Renderer-facing context (device/queue + surface format + target size).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Physical pixels.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
        }
    }

    /// Target size in whole pixels, never zero.
    #[inline]
    pub fn target_size(&self) -> (u32, u32) {
        (
            (self.viewport.width as u32).max(1),
            (self.viewport.height as u32).max(1),
        )
    }
}

/// Where a frame's passes record: the encoder and the color attachment.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Borrows the encoder and swapchain view of an acquired frame.
    #[inline]
    pub fn from_frame(frame: &'a mut GpuFrame) -> Self {
        Self::new(&mut frame.encoder, &frame.view)
    }
}
