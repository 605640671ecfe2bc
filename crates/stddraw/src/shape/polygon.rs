use stddraw_engine::coords::Vec2;
use stddraw_engine::surface::Surface;

use crate::display_list::DisplayList;
use crate::style::Pen;

use super::{FillMode, Shape};

/// Closed polygon through device points.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<Vec2>,
    pub pen: Pen,
    pub fill: FillMode,
}

impl PolygonShape {
    /// Pairs `xs[i]` with `ys[i]`.
    ///
    /// # Panics
    /// Panics if `xs` and `ys` differ in length. Callers validate lengths
    /// before constructing a polygon.
    pub fn from_coords(xs: &[f32], ys: &[f32], pen: Pen, fill: FillMode) -> Self {
        assert_eq!(
            xs.len(),
            ys.len(),
            "polygon coordinate sequences must have the same length"
        );
        let points = xs.iter().zip(ys).map(|(&x, &y)| Vec2::new(x, y)).collect();
        Self { points, pen, fill }
    }

    pub(super) fn render(&self, surface: &mut dyn Surface) {
        match self.fill {
            FillMode::Outline => surface.draw_polygon(&self.pen.stroke(), &self.points),
            FillMode::Filled => surface.fill_polygon(self.pen.fill_color(), &self.points),
        }
    }
}

impl Shape {
    #[inline]
    pub fn polygon(xs: &[f32], ys: &[f32], pen: Pen, fill: FillMode) -> Self {
        Shape::Polygon(PolygonShape::from_coords(xs, ys, pen, fill))
    }
}

impl DisplayList {
    #[inline]
    pub fn push_polygon(&mut self, xs: &[f32], ys: &[f32], pen: Pen, fill: FillMode) {
        self.push(Shape::polygon(xs, ys, pen, fill));
    }
}
