use stddraw_engine::coords::Rect;
use stddraw_engine::paint::LineCap;
use stddraw_engine::surface::Surface;

use crate::display_list::DisplayList;
use crate::style::Pen;

use super::Shape;

/// Elliptical arc.
///
/// Angles are degrees from 3 o'clock, counter-clockwise positive. The
/// surface measures clockwise, so both angles are negated when rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub bounds: Rect,
    pub start_deg: f32,
    pub sweep_deg: f32,
    pub pen: Pen,
}

impl ArcShape {
    pub(super) fn render(&self, surface: &mut dyn Surface) {
        let stroke = self.pen.stroke().with_cap(LineCap::Round);
        surface.draw_arc(&stroke, self.bounds, -self.start_deg, -self.sweep_deg);
    }
}

impl Shape {
    #[inline]
    pub fn arc(bounds: Rect, start_deg: f32, sweep_deg: f32, pen: Pen) -> Self {
        Shape::Arc(ArcShape { bounds, start_deg, sweep_deg, pen })
    }
}

impl DisplayList {
    #[inline]
    pub fn push_arc(&mut self, bounds: Rect, start_deg: f32, sweep_deg: f32, pen: Pen) {
        self.push(Shape::arc(bounds, start_deg, sweep_deg, pen));
    }
}
