use stddraw_engine::coords::Vec2;
use stddraw_engine::surface::Surface;

use crate::display_list::DisplayList;
use crate::style::Pen;

use super::Shape;

/// Straight segment between two device points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub from: Vec2,
    pub to: Vec2,
    pub pen: Pen,
}

impl LineShape {
    pub(super) fn render(&self, surface: &mut dyn Surface) {
        surface.draw_line(&self.pen.stroke(), self.from, self.to);
    }
}

impl Shape {
    #[inline]
    pub fn line(from: Vec2, to: Vec2, pen: Pen) -> Self {
        Shape::Line(LineShape { from, to, pen })
    }
}

impl DisplayList {
    /// Records a line.
    #[inline]
    pub fn push_line(&mut self, from: Vec2, to: Vec2, pen: Pen) {
        self.push(Shape::line(from, to, pen));
    }
}
