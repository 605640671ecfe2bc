use stddraw_engine::paint::{Color, Stroke};

use super::{NamedColor, Rgba};

pub const DEFAULT_PEN_RADIUS: f64 = 0.002;

/// Device pixels of stroke width per unit of pen radius.
pub const PEN_RADIUS_TO_PIXELS: f64 = 500.0;

/// Pen: color plus radius. The radius is non-negative once it passes the
/// drawing facade.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pen {
    pub color: Rgba,
    pub radius: f64,
}

impl Pen {
    #[inline]
    pub const fn new(color: Rgba, radius: f64) -> Self {
        Self { color, radius }
    }

    /// Stroke width in device pixels.
    #[inline]
    pub fn stroke_width(&self) -> f32 {
        (self.radius * PEN_RADIUS_TO_PIXELS) as f32
    }

    /// Outline stroke. Outlines ignore the pen's alpha.
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.color.to_opaque_color(), self.stroke_width())
    }

    /// Color used for fills and text.
    #[inline]
    pub fn fill_color(&self) -> Color {
        self.color.to_color()
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(NamedColor::Black.rgba(), DEFAULT_PEN_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pen_is_one_pixel_black() {
        let pen = Pen::default();
        assert_eq!(pen.color, Rgba::new(0, 0, 0));
        assert_eq!(pen.stroke_width(), 1.0);
    }

    #[test]
    fn stroke_scales_radius() {
        let pen = Pen::new(NamedColor::BookRed.rgba(), 0.02);
        let stroke = pen.stroke();
        assert_eq!(stroke.width, 10.0);
        assert_eq!(stroke.color, Color::from_rgba_u8(150, 35, 31, 255));
    }

    #[test]
    fn outline_drops_alpha_but_fill_keeps_it() {
        let pen = Pen::new(Rgba::new(255, 255, 255).with_alpha(0), 0.01);
        assert_eq!(pen.stroke().color.a, 1.0);
        assert_eq!(pen.fill_color().a, 0.0);
    }
}
