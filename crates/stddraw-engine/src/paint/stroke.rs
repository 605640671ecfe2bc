use super::Color;

/// End treatment for open strokes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LineCap {
    /// The stroke ends exactly at the endpoint.
    #[default]
    Flat,
    /// A half disc of the stroke width is added past each endpoint.
    Round,
}

/// Stroke drawn along outlined geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Width in device pixels. Rasterizers draw at least one pixel.
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width, cap: LineCap::Flat }
    }

    #[inline]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Width actually rasterized: hairlines are widened to one pixel.
    #[inline]
    pub fn raster_width(&self) -> f32 {
        if self.width.is_finite() { self.width.max(1.0) } else { 1.0 }
    }
}
