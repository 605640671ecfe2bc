//! Display surface: the display list, the current pen/font, and the window
//! that repaints them.
//!
//! A `Render` is shared between the producer (the drawing facade, which
//! records shapes) and the rendering thread (which runs [`Render::show`]).
//! Recording only holds the list lock for the push; the rendering thread
//! copies newly appended shapes into its own list and paints without any
//! lock held.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use stddraw_engine::coords::{Rect, Vec2};
use stddraw_engine::window::{Backend, NativeWindow, PumpStatus, WindowConfig, Waker};

use crate::config::DrawConfig;
use crate::display_list::DisplayList;
use crate::error::DrawError;
use crate::shape::{FillMode, Shape};
use crate::style::{Font, Pen, Rgba};

/// Canvas size in device pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Window lifecycle. A `Render` owns at most one window over its lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Open,
    Closed,
}

#[derive(Debug, Clone)]
struct Style {
    pen: Pen,
    font: Font,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Shapes and styles stay valid even if a holder panicked.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct Render<B: Backend> {
    backend: B,
    title: String,
    background: Rgba,

    shapes: Mutex<DisplayList>,
    style: Mutex<Style>,
    canvas: Mutex<Canvas>,
    session: Mutex<SessionState>,

    cancelled: AtomicBool,
    wake_pending: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl<B: Backend> Render<B> {
    pub fn new(backend: B, config: &DrawConfig) -> Self {
        Self {
            backend,
            title: config.title.clone(),
            background: config.background,
            shapes: Mutex::new(DisplayList::new()),
            style: Mutex::new(Style { pen: config.pen(), font: config.font.clone() }),
            canvas: Mutex::new(Canvas { width: config.width, height: config.height }),
            session: Mutex::new(SessionState::Uninitialized),
            cancelled: AtomicBool::new(false),
            wake_pending: AtomicBool::new(false),
            waker: Mutex::new(None),
        }
    }

    // ── recording ─────────────────────────────────────────────────────────

    pub fn record_line(&self, from: Vec2, to: Vec2) {
        let pen = self.pen();
        self.append(|list| list.push_line(from, to, pen));
    }

    pub fn record_ellipse(&self, bounds: Rect, fill: FillMode) {
        let pen = self.pen();
        self.append(|list| list.push_ellipse(bounds, pen, fill));
    }

    pub fn record_rectangle(&self, bounds: Rect, fill: FillMode) {
        let pen = self.pen();
        self.append(|list| list.push_rectangle(bounds, pen, fill));
    }

    /// `start_deg`/`sweep_deg` are counter-clockwise from 3 o'clock.
    pub fn record_arc(&self, bounds: Rect, start_deg: f32, sweep_deg: f32) {
        let pen = self.pen();
        self.append(|list| list.push_arc(bounds, start_deg, sweep_deg, pen));
    }

    /// # Panics
    /// Panics if `xs` and `ys` differ in length.
    pub fn record_polygon(&self, xs: &[f32], ys: &[f32], fill: FillMode) {
        // Built outside the lock so a length mismatch cannot poison it.
        let shape = Shape::polygon(xs, ys, self.pen(), fill);
        self.append(|list| {
            list.push(shape);
        });
    }

    /// `origin` is the top-left corner of the text box.
    pub fn record_text(&self, text: &str, origin: Vec2) {
        let Style { pen, font } = lock(&self.style).clone();
        self.append(|list| list.push_text(text, origin, pen, font));
    }

    fn append(&self, push: impl FnOnce(&mut DisplayList)) {
        let count = {
            let mut list = lock(&self.shapes);
            push(&mut list);
            list.len()
        };
        log::trace!("recorded shape #{count}");

        // One wake per painted frame is enough; the loop clears the flag
        // before it copies the list.
        if !self.wake_pending.swap(true, Ordering::SeqCst) {
            self.wake();
        }
    }

    /// Copy of the display list as it is now.
    pub fn shapes(&self) -> Vec<Arc<Shape>> {
        lock(&self.shapes).shapes().to_vec()
    }

    pub fn shape_count(&self) -> usize {
        lock(&self.shapes).len()
    }

    // ── style ─────────────────────────────────────────────────────────────

    pub fn pen(&self) -> Pen {
        lock(&self.style).pen
    }

    pub fn set_pen(&self, pen: Pen) {
        lock(&self.style).pen = pen;
    }

    pub fn font(&self) -> Font {
        lock(&self.style).font.clone()
    }

    pub fn set_font(&self, font: Font) {
        lock(&self.style).font = font;
    }

    /// `(width, height)` of `text` in the current font, in device pixels.
    pub fn measure_text(&self, text: &str) -> (f64, f64) {
        let font = self.font();
        let size = self.backend.measure_text(&font.face(), font.size as f32, text);
        (size.x as f64, size.y as f64)
    }

    // ── canvas ────────────────────────────────────────────────────────────

    pub fn canvas_size(&self) -> Canvas {
        *lock(&self.canvas)
    }

    /// Takes effect for a window that does not exist yet.
    pub fn set_canvas_size(&self, width: u32, height: u32) {
        *lock(&self.canvas) = Canvas { width, height };
        if self.session_state() != SessionState::Uninitialized {
            log::warn!("canvas resized to {width}x{height} after the window was created; no visible effect");
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    pub fn session_state(&self) -> SessionState {
        *lock(&self.session)
    }

    /// Asks a running `show()` to return; a `show()` that has not started yet
    /// returns immediately.
    pub fn close(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.wake();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Creates the window and runs the repaint/event loop until the window
    /// is closed by the user or [`Render::close`] is called.
    ///
    /// Only the first call creates a window. Calling again after it closed
    /// returns `Ok(())` at once; calling while it runs is an error.
    pub fn show(&self) -> Result<(), DrawError> {
        {
            let mut session = lock(&self.session);
            match *session {
                SessionState::Open => return Err(DrawError::AlreadyShowing),
                SessionState::Closed => return Ok(()),
                SessionState::Uninitialized => *session = SessionState::Open,
            }
        }

        let result = self.run_window();

        *lock(&self.waker) = None;
        *lock(&self.session) = SessionState::Closed;
        log::info!("drawing session closed");
        result
    }

    fn run_window(&self) -> Result<(), DrawError> {
        let mut window = self.backend.create_window(&self.window_config())?;

        // Registered before the first cancellation check so a concurrent
        // `close()` either sees the waker or is seen by the loop.
        *lock(&self.waker) = Some(window.waker());
        log::debug!("render loop started");

        let mut painted: Vec<Arc<Shape>> = Vec::new();
        loop {
            if self.is_cancelled() {
                break;
            }

            self.wake_pending.store(false, Ordering::SeqCst);
            self.sync(&mut painted);

            window.repaint(&mut |surface| {
                for shape in &painted {
                    shape.render(surface);
                }
            })?;

            if !self.is_open(&mut window) {
                break;
            }
        }

        log::debug!("render loop exited after painting {} shapes", painted.len());
        Ok(())
    }

    /// Waits for the next native event. `false` once the window has quit or
    /// cancellation was requested.
    fn is_open(&self, window: &mut B::Window) -> bool {
        if self.is_cancelled() {
            return false;
        }
        match window.pump_next_event() {
            PumpStatus::Quit => false,
            PumpStatus::Continue => !self.is_cancelled(),
        }
    }

    /// Copies shapes appended since the last frame.
    fn sync(&self, painted: &mut Vec<Arc<Shape>>) {
        let list = lock(&self.shapes);
        painted.extend(list.since(painted.len()).iter().cloned());
    }

    fn wake(&self) {
        if let Some(waker) = lock(&self.waker).as_ref() {
            waker();
        }
    }

    fn window_config(&self) -> WindowConfig {
        let canvas = self.canvas_size();
        WindowConfig {
            title: self.title.clone(),
            width: canvas.width,
            height: canvas.height,
            clear: self.background.to_color(),
        }
    }
}
