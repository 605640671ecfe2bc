/// Surface and device options for the window backend.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface when one exists. Off: pen colors are sRGB bytes
    /// already and must reach a `Unorm` surface untouched.
    pub prefer_srgb: bool,
    /// Repaints are event driven; FIFO is available everywhere.
    pub present_mode: wgpu::PresentMode,
    /// Falls back to the first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub fn with_present_mode(mut self, present_mode: wgpu::PresentMode) -> Self {
        self.present_mode = present_mode;
        self
    }

    pub fn with_srgb(mut self, prefer_srgb: bool) -> Self {
        self.prefer_srgb = prefer_srgb;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_a_plain_unorm_surface() {
        let init = GpuInit::default();
        assert!(!init.prefer_srgb);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(GpuInit::default().with_srgb(true).prefer_srgb);
    }
}
