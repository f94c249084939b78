use crate::coords::Viewport;

/// One acquired surface texture plus the encoder recording into it.
///
/// Short-lived: hand it back to [`Gpu::submit`](super::Gpu::submit) promptly, since
/// holding the surface texture blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the acquired texture, which can lag a pending resize by a frame.
    pub fn viewport(&self) -> Viewport {
        let texture = &self.surface_texture.texture;
        Viewport::from_physical(texture.width(), texture.height())
    }
}
