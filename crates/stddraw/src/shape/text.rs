use stddraw_engine::coords::Vec2;
use stddraw_engine::surface::{Surface, TextRun};

use crate::display_list::DisplayList;
use crate::style::{Font, Pen};

use super::Shape;

/// A single line of text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub origin: Vec2,
    pub pen: Pen,
    pub font: Font,
}

impl TextShape {
    pub(super) fn render(&self, surface: &mut dyn Surface) {
        surface.draw_text(&TextRun {
            text: &self.text,
            face: self.font.face(),
            size: self.font.size as f32,
            color: self.pen.fill_color(),
            origin: self.origin,
            underline: self.font.underline(),
            strikeout: self.font.strikeout(),
        });
    }
}

impl Shape {
    #[inline]
    pub fn text(text: impl Into<String>, origin: Vec2, pen: Pen, font: Font) -> Self {
        Shape::Text(TextShape { text: text.into(), origin, pen, font })
    }
}

impl DisplayList {
    #[inline]
    pub fn push_text(&mut self, text: impl Into<String>, origin: Vec2, pen: Pen, font: Font) {
        self.push(Shape::text(text, origin, pen, font));
    }
}
