use crate::render::shapes::LineRenderer;

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Instance colors are linear; an sRGB target does the encode on write.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Features the device must have. Device creation fails without them.
    pub required_features: wgpu::Features,

    /// Features requested only when the adapter offers them.
    ///
    /// The default asks for [`LineRenderer::required_features`], which line
    /// accumulation needs for a read-write `rgba32float` storage texture.
    pub optional_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            optional_features: LineRenderer::required_features(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Features to request from an adapter offering `available`.
    pub(crate) fn features_for(&self, available: wgpu::Features) -> wgpu::Features {
        self.required_features | (self.optional_features & available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_features_are_masked_by_adapter() {
        let init = GpuInit::default();
        assert_eq!(init.features_for(wgpu::Features::empty()), wgpu::Features::empty());
        assert_eq!(
            init.features_for(wgpu::Features::all()),
            wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES
        );
    }

    #[test]
    fn default_requests_line_accumulation_features() {
        let init = GpuInit::default();
        assert!(init.optional_features.contains(LineRenderer::required_features()));
        assert_eq!(
            init.features_for(LineRenderer::required_features()),
            LineRenderer::required_features()
        );
    }

    #[test]
    fn required_features_are_always_requested() {
        let init = GpuInit {
            required_features: wgpu::Features::DEPTH_CLIP_CONTROL,
            ..GpuInit::default()
        };
        assert!(init.features_for(wgpu::Features::empty()).contains(wgpu::Features::DEPTH_CLIP_CONTROL));
    }
}
