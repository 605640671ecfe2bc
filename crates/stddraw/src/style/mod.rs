//! Color, pen and font values.
//!
//! Pure data. Shapes copy these at record time, so later style changes never
//! reach shapes that are already in the display list.

mod color;
mod font;
mod pen;

pub use color::{NamedColor, Rgba};
pub use font::{Font, FontStyle, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE};
pub use pen::{Pen, DEFAULT_PEN_RADIUS, PEN_RADIUS_TO_PIXELS};
