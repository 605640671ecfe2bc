//! Windowless backend for tests and CI.
//!
//! [`HeadlessBackend`] satisfies the window contract without a display
//! server: every repaint records the surface calls it received as one frame,
//! and a [`HeadlessController`] plays the part of the user (asking for a
//! redraw, closing the window) and observes what was painted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Stroke};
use crate::surface::{Surface, TextRun};
use crate::text::FaceQuery;
use crate::window::{Backend, NativeWindow, PumpStatus, WindowConfig, Waker};
use crate::EngineError;

/// One recorded `Surface` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Line { stroke: Stroke, from: Vec2, to: Vec2 },
    Ellipse { stroke: Stroke, bounds: Rect },
    FillEllipse { color: Color, bounds: Rect },
    Arc { stroke: Stroke, bounds: Rect, start_deg: f32, sweep_deg: f32 },
    Rectangle { stroke: Stroke, bounds: Rect },
    FillRectangle { color: Color, bounds: Rect },
    Polygon { stroke: Stroke, points: Vec<Vec2> },
    FillPolygon { color: Color, points: Vec<Vec2> },
    Text {
        text: String,
        family: String,
        bold: bool,
        italic: bool,
        size: f32,
        color: Color,
        origin: Vec2,
        underline: bool,
        strikeout: bool,
    },
}

/// All surface calls of one repaint, in order.
pub type RecordedFrame = Vec<SurfaceOp>;

#[derive(Debug, Copy, Clone)]
enum Event {
    Wake,
    Redraw,
    Close,
}

#[derive(Default)]
struct Shared {
    frames: Mutex<Vec<RecordedFrame>>,
    painted: Condvar,
    windows_created: AtomicUsize,
    window_config: Mutex<Option<WindowConfig>>,
    create_error: Mutex<Option<EngineError>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test thread must not hide the frames from the others.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ── backend ───────────────────────────────────────────────────────────────

/// Backend hosting at most one recording window.
pub struct HeadlessBackend {
    shared: Arc<Shared>,
    events_tx: Sender<Event>,
    events_rx: Mutex<Option<Receiver<Event>>>,
}

impl HeadlessBackend {
    pub fn new() -> (HeadlessBackend, HeadlessController) {
        let shared = Arc::new(Shared::default());
        let (tx, rx) = mpsc::channel();

        let controller = HeadlessController {
            shared: Arc::clone(&shared),
            events_tx: tx.clone(),
        };
        let backend = HeadlessBackend {
            shared,
            events_tx: tx,
            events_rx: Mutex::new(Some(rx)),
        };
        (backend, controller)
    }

    /// Width of `text` under the deterministic metric: half an em per char.
    pub fn text_width(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }
}

impl Backend for HeadlessBackend {
    type Window = HeadlessWindow;

    fn create_window(&self, config: &WindowConfig) -> Result<HeadlessWindow, EngineError> {
        if let Some(err) = lock(&self.shared.create_error).take() {
            return Err(err);
        }
        let events = lock(&self.events_rx).take().ok_or(EngineError::Closed)?;

        *lock(&self.shared.window_config) = Some(config.clone());
        self.shared.windows_created.fetch_add(1, Ordering::SeqCst);
        log::debug!("headless window '{}' created ({}x{})", config.title, config.width, config.height);

        Ok(HeadlessWindow {
            shared: Arc::clone(&self.shared),
            events,
            events_tx: self.events_tx.clone(),
            closed: false,
        })
    }

    fn measure_text(&self, _face: &FaceQuery<'_>, size: f32, text: &str) -> Vec2 {
        Vec2::new(Self::text_width(text, size), size)
    }
}

// ── window ────────────────────────────────────────────────────────────────

pub struct HeadlessWindow {
    shared: Arc<Shared>,
    events: Receiver<Event>,
    events_tx: Sender<Event>,
    closed: bool,
}

impl NativeWindow for HeadlessWindow {
    fn repaint(&mut self, paint: &mut dyn FnMut(&mut dyn Surface)) -> Result<(), EngineError> {
        if self.closed {
            return Ok(());
        }

        let mut surface = RecordingSurface::new();
        paint(&mut surface);

        lock(&self.shared.frames).push(surface.into_ops());
        self.shared.painted.notify_all();
        Ok(())
    }

    fn pump_next_event(&mut self) -> PumpStatus {
        if self.closed {
            return PumpStatus::Quit;
        }
        match self.events.recv() {
            Ok(Event::Wake) | Ok(Event::Redraw) => PumpStatus::Continue,
            Ok(Event::Close) | Err(_) => {
                self.closed = true;
                PumpStatus::Quit
            }
        }
    }

    fn waker(&self) -> Waker {
        let tx = Mutex::new(self.events_tx.clone());
        Arc::new(move || {
            let _ = lock(&tx).send(Event::Wake);
        })
    }
}

// ── controller ────────────────────────────────────────────────────────────

/// Test-side handle: injects window events and inspects painted frames.
#[derive(Clone)]
pub struct HeadlessController {
    shared: Arc<Shared>,
    events_tx: Sender<Event>,
}

impl HeadlessController {
    /// Simulates an OS repaint request.
    pub fn request_redraw(&self) {
        let _ = self.events_tx.send(Event::Redraw);
    }

    /// Simulates the user closing the window.
    pub fn close(&self) {
        let _ = self.events_tx.send(Event::Close);
    }

    /// Makes the next `create_window` fail with `err`.
    pub fn fail_window_creation(&self, err: EngineError) {
        *lock(&self.shared.create_error) = Some(err);
    }

    pub fn frames(&self) -> Vec<RecordedFrame> {
        lock(&self.shared.frames).clone()
    }

    pub fn frame_count(&self) -> usize {
        lock(&self.shared.frames).len()
    }

    pub fn last_frame(&self) -> Option<RecordedFrame> {
        lock(&self.shared.frames).last().cloned()
    }

    /// Blocks until at least `count` frames were painted. Returns `false` on
    /// timeout.
    pub fn wait_for_frames(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut frames = lock(&self.shared.frames);
        while frames.len() < count {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            frames = match self.shared.painted.wait_timeout(frames, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        true
    }

    /// Blocks until a painted frame satisfies `pred`. Returns that frame, or
    /// `None` on timeout.
    pub fn wait_for_frame_where(
        &self,
        timeout: Duration,
        mut pred: impl FnMut(&RecordedFrame) -> bool,
    ) -> Option<RecordedFrame> {
        let deadline = Instant::now() + timeout;
        let mut frames = lock(&self.shared.frames);
        loop {
            if let Some(frame) = frames.iter().rev().find(|f| pred(f)) {
                return Some(frame.clone());
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            frames = match self.shared.painted.wait_timeout(frames, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }

    pub fn windows_created(&self) -> usize {
        self.shared.windows_created.load(Ordering::SeqCst)
    }

    /// Configuration the window was created with, once it exists.
    pub fn window_config(&self) -> Option<WindowConfig> {
        lock(&self.shared.window_config).clone()
    }
}

// ── recording surface ─────────────────────────────────────────────────────

/// Surface that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_ops(self) -> RecordedFrame {
        self.ops
    }
}

impl Surface for RecordingSurface {
    fn draw_line(&mut self, stroke: &Stroke, from: Vec2, to: Vec2) {
        self.ops.push(SurfaceOp::Line { stroke: *stroke, from, to });
    }

    fn draw_ellipse(&mut self, stroke: &Stroke, bounds: Rect) {
        self.ops.push(SurfaceOp::Ellipse { stroke: *stroke, bounds });
    }

    fn fill_ellipse(&mut self, color: Color, bounds: Rect) {
        self.ops.push(SurfaceOp::FillEllipse { color, bounds });
    }

    fn draw_arc(&mut self, stroke: &Stroke, bounds: Rect, start_deg: f32, sweep_deg: f32) {
        self.ops.push(SurfaceOp::Arc { stroke: *stroke, bounds, start_deg, sweep_deg });
    }

    fn draw_rectangle(&mut self, stroke: &Stroke, bounds: Rect) {
        self.ops.push(SurfaceOp::Rectangle { stroke: *stroke, bounds });
    }

    fn fill_rectangle(&mut self, color: Color, bounds: Rect) {
        self.ops.push(SurfaceOp::FillRectangle { color, bounds });
    }

    fn draw_polygon(&mut self, stroke: &Stroke, points: &[Vec2]) {
        self.ops.push(SurfaceOp::Polygon { stroke: *stroke, points: points.to_vec() });
    }

    fn fill_polygon(&mut self, color: Color, points: &[Vec2]) {
        self.ops.push(SurfaceOp::FillPolygon { color, points: points.to_vec() });
    }

    fn draw_text(&mut self, run: &TextRun<'_>) {
        self.ops.push(SurfaceOp::Text {
            text: run.text.to_string(),
            family: run.face.family.to_string(),
            bold: run.face.bold,
            italic: run.face.italic,
            size: run.size,
            color: run.color,
            origin: run.origin,
            underline: run.underline,
            strikeout: run.strikeout,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_window_is_refused() {
        let (backend, ctl) = HeadlessBackend::new();
        assert!(backend.create_window(&WindowConfig::default()).is_ok());
        assert_eq!(
            backend.create_window(&WindowConfig::default()).err(),
            Some(EngineError::Closed)
        );
        assert_eq!(ctl.windows_created(), 1);
    }

    #[test]
    fn repaint_records_one_frame() {
        let (backend, ctl) = HeadlessBackend::new();
        let mut window = backend.create_window(&WindowConfig::default()).unwrap();

        window
            .repaint(&mut |s: &mut dyn Surface| {
                s.fill_rectangle(Color::black(), Rect::new(1.0, 2.0, 3.0, 4.0));
            })
            .unwrap();

        assert_eq!(ctl.frame_count(), 1);
        assert_eq!(
            ctl.last_frame().unwrap(),
            vec![SurfaceOp::FillRectangle { color: Color::black(), bounds: Rect::new(1.0, 2.0, 3.0, 4.0) }]
        );
    }

    #[test]
    fn close_makes_the_pump_quit() {
        let (backend, ctl) = HeadlessBackend::new();
        let mut window = backend.create_window(&WindowConfig::default()).unwrap();

        ctl.request_redraw();
        ctl.close();
        assert_eq!(window.pump_next_event(), PumpStatus::Continue);
        assert_eq!(window.pump_next_event(), PumpStatus::Quit);
        assert_eq!(window.pump_next_event(), PumpStatus::Quit);
    }

    #[test]
    fn waker_unblocks_pump_from_another_thread() {
        let (backend, _ctl) = HeadlessBackend::new();
        let mut window = backend.create_window(&WindowConfig::default()).unwrap();
        let wake = window.waker();

        let t = std::thread::spawn(move || wake());
        assert_eq!(window.pump_next_event(), PumpStatus::Continue);
        t.join().unwrap();
    }

    #[test]
    fn wait_for_frames_times_out() {
        let (_backend, ctl) = HeadlessBackend::new();
        assert!(!ctl.wait_for_frames(1, Duration::from_millis(20)));
    }

    #[test]
    fn injected_creation_error_is_returned_once() {
        let (backend, ctl) = HeadlessBackend::new();
        ctl.fail_window_creation(EngineError::Gpu("no adapter".to_string()));
        assert_eq!(
            backend.create_window(&WindowConfig::default()).err(),
            Some(EngineError::Gpu("no adapter".to_string()))
        );
        assert!(backend.create_window(&WindowConfig::default()).is_ok());
    }

    #[test]
    fn text_metric_is_deterministic() {
        let (backend, _ctl) = HeadlessBackend::new();
        let face = FaceQuery::new("SansSerif", false, false);
        assert_eq!(backend.measure_text(&face, 16.0, "abcd"), Vec2::new(32.0, 16.0));
    }
}
