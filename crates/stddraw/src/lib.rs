//! Retained-mode 2-D drawing.
//!
//! Client code draws into a user coordinate space through [`StdDraw`]; every
//! call is validated, mapped to device pixels and appended to a display list.
//! A background rendering thread owns the window and repaints the whole list
//! whenever the window needs it.
//!
//! Crate layout:
//! - `style`        colors, pens and fonts
//! - `shape`        the closed set of drawable shapes
//! - `display_list` append-only, paint-ordered shape storage
//! - `render`       display surface: current style, window lifecycle, repaint loop
//! - `draw`         the facade: validation, user scale, rendering thread

pub mod config;
pub mod display_list;
pub mod render;
pub mod shape;
pub mod style;

mod draw;
mod error;

pub use config::{DrawConfig, DEFAULT_CANVAS_SIZE, DEFAULT_TITLE};
pub use display_list::DisplayList;
pub use draw::StdDraw;
pub use error::DrawError;
pub use render::{Canvas, Render, SessionState};
pub use shape::{FillMode, Shape};
pub use style::{Font, FontStyle, NamedColor, Pen, Rgba};

pub use stddraw_engine::headless;
pub use stddraw_engine::logging::{init_logging, LoggingConfig};
pub use stddraw_engine::window::{Backend, WinitBackend};
pub use stddraw_engine::EngineError;
