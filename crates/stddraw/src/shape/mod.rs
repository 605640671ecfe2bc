//! Shape model.
//!
//! A closed set of drawable shapes. Geometry is in device pixels at
//! construction time and every shape carries its own pen (and font) snapshot;
//! rendering never re-transforms and never consults current style state.
//!
//! Shape-specific payloads and their `DisplayList::push_*` helpers live in
//! one file per shape.

mod arc;
mod ellipse;
mod line;
mod polygon;
mod rect;
mod text;

use stddraw_engine::surface::Surface;

pub use arc::ArcShape;
pub use ellipse::EllipseShape;
pub use line::LineShape;
pub use polygon::PolygonShape;
pub use rect::RectangleShape;
pub use text::TextShape;

/// Whether a closed shape is outlined with the pen or filled with its color.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    #[default]
    Outline,
    Filled,
}

/// Drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Ellipse(EllipseShape),
    Arc(ArcShape),
    Rectangle(RectangleShape),
    Polygon(PolygonShape),
    Text(TextShape),
}

impl Shape {
    /// Paints the shape onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Shape::Line(s) => s.render(surface),
            Shape::Ellipse(s) => s.render(surface),
            Shape::Arc(s) => s.render(surface),
            Shape::Rectangle(s) => s.render(surface),
            Shape::Polygon(s) => s.render(surface),
            Shape::Text(s) => s.render(surface),
        }
    }

    /// The pen captured when the shape was recorded.
    pub fn pen(&self) -> &crate::style::Pen {
        match self {
            Shape::Line(s) => &s.pen,
            Shape::Ellipse(s) => &s.pen,
            Shape::Arc(s) => &s.pen,
            Shape::Rectangle(s) => &s.pen,
            Shape::Polygon(s) => &s.pen,
            Shape::Text(s) => &s.pen,
        }
    }
}
