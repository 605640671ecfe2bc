use stddraw_engine::coords::Rect;
use stddraw_engine::surface::Surface;

use crate::display_list::DisplayList;
use crate::style::Pen;

use super::{FillMode, Shape};

/// Ellipse inscribed in a top-left anchored bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    pub bounds: Rect,
    pub pen: Pen,
    pub fill: FillMode,
}

impl EllipseShape {
    pub(super) fn render(&self, surface: &mut dyn Surface) {
        match self.fill {
            FillMode::Outline => surface.draw_ellipse(&self.pen.stroke(), self.bounds),
            FillMode::Filled => surface.fill_ellipse(self.pen.fill_color(), self.bounds),
        }
    }
}

impl Shape {
    #[inline]
    pub fn ellipse(bounds: Rect, pen: Pen, fill: FillMode) -> Self {
        Shape::Ellipse(EllipseShape { bounds, pen, fill })
    }
}

impl DisplayList {
    /// Records an ellipse (circle when the box is square).
    #[inline]
    pub fn push_ellipse(&mut self, bounds: Rect, pen: Pen, fill: FillMode) {
        self.push(Shape::ellipse(bounds, pen, fill));
    }
}
