use stddraw_engine::coords::Rect;
use stddraw_engine::surface::Surface;

use crate::display_list::DisplayList;
use crate::style::Pen;

use super::{FillMode, Shape};

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    pub bounds: Rect,
    pub pen: Pen,
    pub fill: FillMode,
}

impl RectangleShape {
    pub(super) fn render(&self, surface: &mut dyn Surface) {
        match self.fill {
            FillMode::Outline => surface.draw_rectangle(&self.pen.stroke(), self.bounds),
            FillMode::Filled => surface.fill_rectangle(self.pen.fill_color(), self.bounds),
        }
    }
}

impl Shape {
    #[inline]
    pub fn rectangle(bounds: Rect, pen: Pen, fill: FillMode) -> Self {
        Shape::Rectangle(RectangleShape { bounds, pen, fill })
    }
}

impl DisplayList {
    /// Records a rectangle (a square or a one-pixel dot included).
    #[inline]
    pub fn push_rectangle(&mut self, bounds: Rect, pen: Pen, fill: FillMode) {
        self.push(Shape::rectangle(bounds, pen, fill));
    }
}
