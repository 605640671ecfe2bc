//! Device-space geometry.
//!
//! All coordinates are logical pixels of the window's client area, origin
//! top-left, +Y down. Shaders map them to NDC through the [`Viewport`].

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
