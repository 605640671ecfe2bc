use std::sync::Arc;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::surface::Surface;
use crate::text::FaceQuery;
use crate::EngineError;

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Client-area width in device pixels.
    pub width: u32,
    /// Client-area height in device pixels.
    pub height: u32,
    /// Color every repaint starts from.
    pub clear: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "stddraw".to_string(),
            width: 512,
            height: 512,
            clear: Color::white(),
        }
    }
}

/// Result of waiting for the next native event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PumpStatus {
    /// An event was processed; the window is still open.
    Continue,
    /// The window was closed by the user or the OS.
    Quit,
}

/// Thread-safe handle that makes a blocked `pump_next_event` return.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Factory for the single native window plus the text metrics query.
///
/// A backend is shared between the thread issuing drawing calls (which only
/// measures text) and the rendering thread (which creates and drives the
/// window).
pub trait Backend: Send + Sync + 'static {
    type Window: NativeWindow;

    /// Creates and shows the window. Must be called on the thread that will
    /// drive it.
    fn create_window(&self, config: &WindowConfig) -> Result<Self::Window, EngineError>;

    /// Returns `(width, height)` of `text` laid out on one line.
    fn measure_text(&self, face: &FaceQuery<'_>, size: f32, text: &str) -> Vec2;
}

/// A realized window, owned by the rendering thread.
pub trait NativeWindow {
    /// Runs `paint` against a fresh drawing surface and presents the result.
    fn repaint(&mut self, paint: &mut dyn FnMut(&mut dyn Surface)) -> Result<(), EngineError>;

    /// Blocks until the next native event has been processed.
    fn pump_next_event(&mut self) -> PumpStatus;

    /// Handle that interrupts `pump_next_event` from another thread.
    fn waker(&self) -> Waker;
}
