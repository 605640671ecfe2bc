use std::sync::Arc;

use crate::shape::Shape;

/// Append-only, ordered record of shapes. Paint order is insertion order.
///
/// Shapes are reference counted so the rendering thread can copy the list
/// cheaply and paint without holding any lock.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    shapes: Vec<Arc<Shape>>,
}

impl DisplayList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `shape` on top of everything recorded so far.
    #[inline]
    pub fn push(&mut self, shape: Shape) -> Arc<Shape> {
        let shape = Arc::new(shape);
        self.shapes.push(Arc::clone(&shape));
        shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.shapes
    }

    /// Shapes appended after the first `start`. Empty if `start` is past the end.
    #[inline]
    pub fn since(&self, start: usize) -> &[Arc<Shape>] {
        self.shapes.get(start..).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|s| s.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{NamedColor, Pen};
    use stddraw_engine::coords::Vec2;

    fn line(x: f32) -> Shape {
        Shape::line(Vec2::new(x, 0.0), Vec2::new(x, 10.0), Pen::default())
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut list = DisplayList::new();
        list.push(line(1.0));
        list.push(line(2.0));
        list.push(line(3.0));

        let xs: Vec<f32> = list
            .iter()
            .map(|s| match s {
                Shape::Line(l) => l.from.x,
                other => panic!("unexpected shape {other:?}"),
            })
            .collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn since_returns_the_new_tail() {
        let mut list = DisplayList::new();
        list.push(line(1.0));
        list.push(line(2.0));
        assert_eq!(list.since(1).len(), 1);
        assert!(list.since(2).is_empty());
        assert!(list.since(99).is_empty());
    }

    #[test]
    fn pushed_shapes_are_shared_not_copied() {
        let mut list = DisplayList::new();
        let shape = list.push(Shape::line(Vec2::zero(), Vec2::zero(), Pen::new(NamedColor::Red.rgba(), 0.0)));
        assert!(Arc::ptr_eq(&shape, &list.shapes()[0]));
    }
}
