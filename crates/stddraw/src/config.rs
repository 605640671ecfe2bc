use crate::style::{Font, NamedColor, Pen, Rgba, DEFAULT_PEN_RADIUS};

pub const DEFAULT_CANVAS_SIZE: u32 = 512;
pub const DEFAULT_TITLE: &str = "Standard Draw";

/// Session configuration: the initial (and reset) state of a drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawConfig {
    /// Canvas width in device pixels.
    pub width: u32,
    /// Canvas height in device pixels.
    pub height: u32,
    pub title: String,

    /// User-space x range mapped onto the canvas width.
    pub x_scale: (f64, f64),
    /// User-space y range mapped onto the canvas height (y up).
    pub y_scale: (f64, f64),

    pub pen_radius: f64,
    pub pen_color: Rgba,
    pub font: Font,
    pub background: Rgba,

    /// Dropping the session closes the window instead of waiting for the
    /// user to close it.
    pub close_on_drop: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            title: DEFAULT_TITLE.to_string(),
            x_scale: (0.0, 1.0),
            y_scale: (0.0, 1.0),
            pen_radius: DEFAULT_PEN_RADIUS,
            pen_color: NamedColor::Black.rgba(),
            font: Font::default(),
            background: NamedColor::White.rgba(),
            close_on_drop: true,
        }
    }
}

impl DrawConfig {
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_x_scale(mut self, min: f64, max: f64) -> Self {
        self.x_scale = (min, max);
        self
    }

    pub fn with_y_scale(mut self, min: f64, max: f64) -> Self {
        self.y_scale = (min, max);
        self
    }

    pub fn with_pen_radius(mut self, radius: f64) -> Self {
        self.pen_radius = radius;
        self
    }

    pub fn with_pen_color(mut self, color: impl Into<Rgba>) -> Self {
        self.pen_color = color.into();
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_background(mut self, color: impl Into<Rgba>) -> Self {
        self.background = color.into();
        self
    }

    pub fn with_close_on_drop(mut self, close: bool) -> Self {
        self.close_on_drop = close;
        self
    }

    /// The pen a fresh session starts with.
    pub fn pen(&self) -> Pen {
        Pen::new(self.pen_color, self.pen_radius)
    }
}
