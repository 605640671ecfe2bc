//! Rasterization contract.
//!
//! A `Surface` paints primitives onto the window for one repaint pass. All
//! geometry is in device pixels (top-left origin, +Y down) and must already be
//! transformed by the caller.
//!
//! Angles follow the native convention: degrees, measured from 3 o'clock,
//! increasing clockwise on screen.

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, Stroke};
use crate::text::FaceQuery;

/// A single run of text to draw, anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub face: FaceQuery<'a>,
    /// Font size in device pixels.
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    pub underline: bool,
    pub strikeout: bool,
}

/// Drawing operations a backend exposes for one repaint pass.
pub trait Surface {
    fn draw_line(&mut self, stroke: &Stroke, from: Vec2, to: Vec2);

    fn draw_ellipse(&mut self, stroke: &Stroke, bounds: Rect);

    fn fill_ellipse(&mut self, color: Color, bounds: Rect);

    /// Outlines the part of the ellipse inscribed in `bounds` from
    /// `start_deg` through `start_deg + sweep_deg`.
    fn draw_arc(&mut self, stroke: &Stroke, bounds: Rect, start_deg: f32, sweep_deg: f32);

    fn draw_rectangle(&mut self, stroke: &Stroke, bounds: Rect);

    fn fill_rectangle(&mut self, color: Color, bounds: Rect);

    /// Outlines the closed polygon through `points`.
    fn draw_polygon(&mut self, stroke: &Stroke, points: &[Vec2]);

    fn fill_polygon(&mut self, color: Color, points: &[Vec2]);

    fn draw_text(&mut self, run: &TextRun<'_>);
}
