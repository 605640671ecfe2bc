//! Font loading, face resolution and text measurement (fontdue).

mod config;
mod font_system;

pub use config::{FaceSource, FontConfig};
pub use font_system::{FaceQuery, FontId, FontLoadError, FontSystem};
