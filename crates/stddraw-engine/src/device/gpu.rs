use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;
use crate::EngineError;

use super::surface::{apply_resize, choose_alpha_mode, choose_surface_format, map_surface_error};
use super::{GpuInit, SurfaceErrorAction};

/// wgpu device, queue and the configured surface of one window.
///
/// The surface borrows the window for `'w`; the window entry that owns both
/// keeps the window alive for as long as this value.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to `window`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        // Flat 2-D drawing; the integrated GPU is plenty.
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        log::debug!("using adapter: {:?}", adapter.get_info());

        let (device, queue) = open_device(&adapter, &init).await?;
        let config = surface_config(&surface.get_capabilities(&adapter), &init, size)?;
        surface.configure(&device, &config);

        Ok(Gpu { surface, device, queue, config, size })
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Drawable size in physical pixels.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Drawable size in logical pixels for a window at `scale_factor`.
    pub fn logical_viewport(&self, scale_factor: f64) -> Viewport {
        Viewport::from_physical(self.size.width, self.size.height, scale_factor)
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize. A 0x0 size (minimized) is
    /// recorded and configuration waits for the window to come back.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        apply_resize(&self.surface, &self.device, &mut self.config, &mut self.size, new_size);
    }

    /// Acquires the next surface texture, lets `record` encode into it, then
    /// submits and presents.
    ///
    /// Lost/outdated surfaces are reconfigured and the frame is skipped; the
    /// next repaint draws again. Running out of memory is fatal.
    pub fn draw_frame<F>(&mut self, record: F) -> Result<(), EngineError>
    where
        F: FnOnce(&Gpu<'w>, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                let reason = err.to_string();
                return match map_surface_error(&self.surface, &self.device, &self.config, self.size, err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface lost permanently: {reason}");
                        Err(EngineError::Gpu(format!("surface unusable: {reason}")))
                    }
                    action => {
                        log::warn!("frame skipped ({action:?}): {reason}");
                        Ok(())
                    }
                };
            }
        };

        let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("stddraw frame encoder"),
        });

        record(&*self, &mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
        Ok(())
    }
}

async fn open_device(adapter: &wgpu::Adapter, init: &GpuInit) -> Result<(wgpu::Device, wgpu::Queue)> {
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("stddraw device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")
}

fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    init: &GpuInit,
    size: PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = choose_surface_format(caps, init.prefer_srgb).context("surface reports no formats")?;
    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: init.present_mode,
        alpha_mode: choose_alpha_mode(caps, init.alpha_mode),
        view_formats: vec![],
        desired_maximum_frame_latency: init.desired_maximum_frame_latency,
    })
}
