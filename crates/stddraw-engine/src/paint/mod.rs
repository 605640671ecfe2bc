//! Paint model shared between the surface contract and renderers.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - stroke description for outlined geometry
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod stroke;

pub use color::Color;
pub use stroke::{LineCap, Stroke};
