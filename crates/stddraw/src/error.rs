use std::fmt;

use stddraw_engine::EngineError;

/// Errors surfaced by the drawing facade and the display surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    /// A non-finite or out-of-range argument, or mismatched coordinate
    /// sequences. Nothing was recorded.
    InvalidArgument(String),
    /// The window or its graphics context could not be created or driven.
    Backend(EngineError),
    /// `show()` was called while another call is still driving the window.
    AlreadyShowing,
    /// The rendering thread could not be started or panicked.
    RenderThread(String),
}

impl DrawError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DrawError::InvalidArgument(msg.into())
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            DrawError::Backend(err) => write!(f, "backend failure: {err}"),
            DrawError::AlreadyShowing => f.write_str("the window is already being shown"),
            DrawError::RenderThread(msg) => write!(f, "rendering thread failed: {msg}"),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EngineError> for DrawError {
    fn from(err: EngineError) -> Self {
        DrawError::Backend(err)
    }
}
