use crate::coords::Viewport;

/// What the renderers need from the GPU for one frame.
pub(crate) struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Logical pixels.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue, surface_format: wgpu::TextureFormat, viewport: Viewport) -> Self {
        Self { device, queue, surface_format, viewport }
    }
}

/// Encoder and swapchain view the painter records into.
pub(crate) struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, view: &'a wgpu::TextureView) -> Self {
        Self { encoder, view }
    }
}
