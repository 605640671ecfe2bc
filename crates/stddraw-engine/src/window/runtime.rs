use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopBuilder, EventLoopProxy};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus as WinitPumpStatus};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::device::{Gpu, GpuInit};
use crate::render::{FrameBuilder, Painter, PolygonCache, RenderCtx, RenderTarget};
use crate::surface::Surface;
use crate::text::{FaceQuery, FontConfig, FontSystem};
use crate::EngineError;

use super::backend::{Backend, NativeWindow, PumpStatus, Waker, WindowConfig};

/// Poll interval while waiting for the platform to deliver the first
/// `resumed` callback.
const CREATE_POLL: Duration = Duration::from_millis(16);

/// Desktop backend: winit window + wgpu surface, fonts via fontdue.
///
/// winit allows one event loop per process, so a `WinitBackend` hosts a
/// single window for the lifetime of the program.
pub struct WinitBackend {
    gpu_init: GpuInit,
    font_config: FontConfig,
    fonts: OnceLock<Arc<FontSystem>>,
}

impl WinitBackend {
    pub fn new() -> Self {
        Self::with_config(GpuInit::default(), FontConfig::default())
    }

    pub fn with_config(gpu_init: GpuInit, font_config: FontConfig) -> Self {
        Self { gpu_init, font_config, fonts: OnceLock::new() }
    }

    /// Font system shared by text measurement and the glyph renderer, loaded
    /// on first use.
    fn fonts(&self) -> Arc<FontSystem> {
        let fonts = self.fonts.get_or_init(|| {
            log::debug!("loading fonts");
            Arc::new(FontSystem::from_config(&self.font_config))
        });
        Arc::clone(fonts)
    }
}

impl Default for WinitBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for WinitBackend {
    type Window = WinitWindow;

    fn create_window(&self, config: &WindowConfig) -> Result<WinitWindow, EngineError> {
        WinitWindow::open(config.clone(), self.gpu_init.clone(), self.fonts())
    }

    fn measure_text(&self, face: &FaceQuery<'_>, size: f32, text: &str) -> Vec2 {
        self.fonts().measure_text(text, face, size)
    }
}

// ── window ────────────────────────────────────────────────────────────────

/// User event sent through the proxy to interrupt a blocked pump.
#[derive(Debug, Copy, Clone)]
struct Wake;

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct WindowState {
    config: WindowConfig,
    gpu_init: GpuInit,
    fonts: Arc<FontSystem>,
    painter: Painter,
    polygons: PolygonCache,

    entry: Option<WindowEntry>,
    error: Option<EngineError>,
    closed: bool,
}

/// The realized winit window, driven from the thread that created it.
pub struct WinitWindow {
    // Drops before `event_loop`: the surface and window go first.
    state: WindowState,
    event_loop: EventLoop<Wake>,
    proxy: Arc<Mutex<EventLoopProxy<Wake>>>,
}

impl WinitWindow {
    fn open(config: WindowConfig, gpu_init: GpuInit, fonts: Arc<FontSystem>) -> Result<Self, EngineError> {
        let event_loop = build_event_loop()?;
        let proxy = event_loop.create_proxy();

        let mut window = WinitWindow {
            state: WindowState {
                config,
                gpu_init,
                fonts,
                painter: Painter::new(),
                polygons: PolygonCache::new(),
                entry: None,
                error: None,
                closed: false,
            },
            event_loop,
            proxy: Arc::new(Mutex::new(proxy)),
        };

        window.wait_until_created()?;
        Ok(window)
    }

    /// Pumps until `resumed` has created the window entry.
    fn wait_until_created(&mut self) -> Result<(), EngineError> {
        loop {
            if let Some(err) = self.state.error.take() {
                return Err(err);
            }
            if self.state.entry.is_some() {
                return Ok(());
            }
            if self.state.closed {
                return Err(EngineError::Window("window closed during creation".to_string()));
            }

            let status = self.event_loop.pump_app_events(Some(CREATE_POLL), &mut self.state);
            if let WinitPumpStatus::Exit(code) = status {
                return Err(self.state.error.take().unwrap_or_else(|| {
                    EngineError::EventLoop(format!("event loop exited with code {code}"))
                }));
            }
        }
    }
}

impl NativeWindow for WinitWindow {
    fn repaint(&mut self, paint: &mut dyn FnMut(&mut dyn Surface)) -> Result<(), EngineError> {
        let state = &mut self.state;
        let Some(entry) = state.entry.as_mut() else {
            return Ok(());
        };

        let mut builder = FrameBuilder::new(&state.fonts, &mut state.polygons);
        paint(&mut builder);
        let frame = builder.finish();

        let clear = state.config.clear;
        let fonts = &state.fonts;
        let painter = &mut state.painter;

        entry.with_mut(|fields| {
            // Geometry is in logical pixels; the surface is physical.
            let scale = fields.window.scale_factor();
            fields.gpu.draw_frame(|gpu, encoder, view| {
                let viewport = gpu.logical_viewport(scale);
                let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport);
                let mut target = RenderTarget::new(encoder, view);
                painter.paint(&ctx, &mut target, &frame, fonts, clear);
            })
        })
    }

    fn pump_next_event(&mut self) -> PumpStatus {
        if self.state.closed {
            return PumpStatus::Quit;
        }

        match self.event_loop.pump_app_events(None, &mut self.state) {
            WinitPumpStatus::Exit(_) => PumpStatus::Quit,
            WinitPumpStatus::Continue if self.state.closed => PumpStatus::Quit,
            WinitPumpStatus::Continue => PumpStatus::Continue,
        }
    }

    fn waker(&self) -> Waker {
        let proxy = Arc::clone(&self.proxy);
        Arc::new(move || {
            if let Ok(proxy) = proxy.lock() {
                // Fails only once the loop is gone, when there is nothing to wake.
                let _ = proxy.send_event(Wake);
            }
        })
    }
}

// ── event handling ────────────────────────────────────────────────────────

impl WindowState {
    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width as f64, self.config.height as f64))
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| EngineError::Window(e.to_string()))?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(|e| EngineError::Gpu(format!("{e:#}")))?;

        log::info!(
            "window '{}' created ({}x{})",
            self.config.title,
            self.config.width,
            self.config.height
        );

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn destroy_window_entry(&mut self) {
        if self.entry.take().is_some() {
            log::info!("window '{}' closed", self.config.title);
        }
        self.closed = true;
    }
}

impl ApplicationHandler<Wake> for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.closed {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("{e}");
            self.error = Some(e);
            self.closed = true;
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: Wake) {
        // Waking the pump is the whole effect.
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.destroy_window_entry();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            _ => {}
        }
    }
}

// ── event loop construction ───────────────────────────────────────────────

fn build_event_loop() -> Result<EventLoop<Wake>, EngineError> {
    let mut builder = EventLoop::<Wake>::with_user_event();
    allow_any_thread(&mut builder);
    builder
        .build()
        .map_err(|e| EngineError::EventLoop(e.to_string()))
}

/// The rendering thread is not the main thread; opt out of winit's check
/// where the platform permits it.
#[cfg(target_os = "windows")]
fn allow_any_thread(builder: &mut EventLoopBuilder<Wake>) {
    use winit::platform::windows::EventLoopBuilderExtWindows;
    builder.with_any_thread(true);
}

#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn allow_any_thread(builder: &mut EventLoopBuilder<Wake>) {
    use winit::platform::wayland::EventLoopBuilderExtWayland;
    use winit::platform::x11::EventLoopBuilderExtX11;
    EventLoopBuilderExtX11::with_any_thread(builder, true);
    EventLoopBuilderExtWayland::with_any_thread(builder, true);
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn allow_any_thread(_builder: &mut EventLoopBuilder<Wake>) {}
