use std::ops::Range;

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Stroke};
use crate::surface::{Surface, TextRun};
use crate::text::{FontId, FontSystem};

use super::common::MeshVertex;
use super::polygons::PolygonCache;
use super::tessellate::{self, Triangle};

/// A text run resolved against the font system, ready for glyph layout.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextDraw {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
}

/// Consecutive work for one pipeline, in paint order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Vertex range in [`Frame::vertices`].
    Mesh(Range<u32>),
    /// Run range in [`Frame::texts`].
    Text(Range<usize>),
}

/// One repaint worth of tessellated geometry and text.
#[derive(Debug, Default)]
pub(crate) struct Frame {
    pub vertices: Vec<MeshVertex>,
    pub texts: Vec<TextDraw>,
    pub segments: Vec<Segment>,
}

impl Frame {
    fn push_triangles(&mut self, triangles: &[Triangle], color: Color) {
        if triangles.is_empty() {
            return;
        }

        let color = color.to_array();
        let start = self.vertices.len() as u32;
        self.vertices.extend(
            triangles
                .iter()
                .flatten()
                .map(|p| MeshVertex { pos: [p.x, p.y], color }),
        );
        let end = self.vertices.len() as u32;

        match self.segments.last_mut() {
            Some(Segment::Mesh(range)) if range.end == start => range.end = end,
            _ => self.segments.push(Segment::Mesh(start..end)),
        }
    }
}

/// Records `Surface` calls into a [`Frame`].
pub(crate) struct FrameBuilder<'f> {
    fonts: &'f FontSystem,
    polygons: &'f mut PolygonCache,
    frame: Frame,
}

impl<'f> FrameBuilder<'f> {
    pub fn new(fonts: &'f FontSystem, polygons: &'f mut PolygonCache) -> Self {
        polygons.begin_frame();
        Self { fonts, polygons, frame: Frame::default() }
    }

    pub fn finish(self) -> Frame {
        self.polygons.end_frame();
        self.frame
    }

    fn push_triangles(&mut self, triangles: &[Triangle], color: Color) {
        self.frame.push_triangles(triangles, color);
    }

    fn push_text(&mut self, draw: TextDraw) {
        let index = self.frame.texts.len();
        self.frame.texts.push(draw);

        match self.frame.segments.last_mut() {
            Some(Segment::Text(range)) if range.end == index => range.end = index + 1,
            _ => self.frame.segments.push(Segment::Text(index..index + 1)),
        }
    }

    fn stroke_outline(&mut self, stroke: &Stroke, points: &[Vec2], closed: bool) {
        let tris = tessellate::stroke_polyline(points, closed, stroke.raster_width(), stroke.cap);
        self.push_triangles(&tris, stroke.color);
    }
}

impl Surface for FrameBuilder<'_> {
    fn draw_line(&mut self, stroke: &Stroke, from: Vec2, to: Vec2) {
        self.stroke_outline(stroke, &[from, to], false);
    }

    fn draw_ellipse(&mut self, stroke: &Stroke, bounds: Rect) {
        let points = tessellate::ellipse_points(bounds);
        self.stroke_outline(stroke, &points, true);
    }

    fn fill_ellipse(&mut self, color: Color, bounds: Rect) {
        let tris = tessellate::fill_convex(&tessellate::ellipse_points(bounds));
        self.push_triangles(&tris, color);
    }

    fn draw_arc(&mut self, stroke: &Stroke, bounds: Rect, start_deg: f32, sweep_deg: f32) {
        let points = tessellate::ellipse_arc_points(bounds, start_deg, sweep_deg);
        self.stroke_outline(stroke, &points, false);
    }

    fn draw_rectangle(&mut self, stroke: &Stroke, bounds: Rect) {
        let tris = tessellate::stroke_rect(bounds, stroke.raster_width());
        self.push_triangles(&tris, stroke.color);
    }

    fn fill_rectangle(&mut self, color: Color, bounds: Rect) {
        self.push_triangles(&tessellate::fill_rect(bounds), color);
    }

    fn draw_polygon(&mut self, stroke: &Stroke, points: &[Vec2]) {
        self.stroke_outline(stroke, points, true);
    }

    fn fill_polygon(&mut self, color: Color, points: &[Vec2]) {
        let triangles = self.polygons.fill(points);
        self.frame.push_triangles(&triangles, color);
    }

    fn draw_text(&mut self, run: &TextRun<'_>) {
        if run.text.is_empty() {
            return;
        }
        let Some(font) = self.fonts.resolve(&run.face) else {
            log::trace!("no font for '{}'; text skipped", run.face.family);
            return;
        };

        self.push_text(TextDraw {
            text: run.text.to_string(),
            font,
            size: run.size,
            color: run.color,
            origin: run.origin,
        });

        if !(run.underline || run.strikeout) {
            return;
        }

        let width = self.fonts.measure_text(run.text, &run.face, run.size).x;
        let ascent = self.fonts.ascent(&run.face, run.size);
        let thickness = (run.size / 14.0).max(1.0);

        // Decorations are flat bars drawn after the glyphs.
        let mut bar = |y: f32| {
            let bounds = Rect::new(run.origin.x, y - thickness * 0.5, width, thickness);
            self.push_triangles(&tessellate::fill_rect(bounds), run.color);
        };
        if run.underline {
            bar(run.origin.y + ascent + thickness);
        }
        if run.strikeout {
            bar(run.origin.y + ascent * 0.65);
        }
    }
}
