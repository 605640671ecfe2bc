use std::fmt;

/// Resource/backend failure raised while creating or driving a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The native event loop could not be created or stopped unexpectedly.
    EventLoop(String),
    /// The native window could not be created.
    Window(String),
    /// The graphics context (adapter, device or surface) could not be created.
    Gpu(String),
    /// The backend can only host one window and it has already been used.
    Closed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::EventLoop(msg) => write!(f, "event loop error: {msg}"),
            EngineError::Window(msg) => write!(f, "window creation failed: {msg}"),
            EngineError::Gpu(msg) => write!(f, "graphics context creation failed: {msg}"),
            EngineError::Closed => f.write_str("backend window has already been consumed"),
        }
    }
}

impl std::error::Error for EngineError {}
