//! Drawing facade.
//!
//! `StdDraw` validates arguments, maps user coordinates onto the canvas and
//! records device-space shapes into its [`Render`]. The first drawing call
//! starts the rendering thread; `wait`/`close` (or dropping the session) join
//! it again.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use stddraw_engine::coords::{Rect, Vec2};
use stddraw_engine::window::{Backend, WinitBackend};

use crate::config::DrawConfig;
use crate::error::DrawError;
use crate::render::{Canvas, Render, SessionState};
use crate::shape::{FillMode, Shape};
use crate::style::{Font, NamedColor, Pen, Rgba};

const RENDER_THREAD_NAME: &str = "stddraw-render";

// ── validation ────────────────────────────────────────────────────────────

fn validate(value: f64, name: &str) -> Result<(), DrawError> {
    if value.is_nan() {
        return Err(DrawError::invalid(format!("{name} is NaN")));
    }
    if value.is_infinite() {
        return Err(DrawError::invalid(format!("{name} is infinite")));
    }
    Ok(())
}

fn validate_nonnegative(value: f64, name: &str) -> Result<(), DrawError> {
    validate(value, name)?;
    if value < 0.0 {
        return Err(DrawError::invalid(format!("{name} negative")));
    }
    Ok(())
}

fn validate_channel(value: i32, name: &str) -> Result<u8, DrawError> {
    u8::try_from(value).map_err(|_| DrawError::invalid(format!("{name} must be between 0 and 255")))
}

fn validate_coords(values: &[f64], axis: &str) -> Result<(), DrawError> {
    for (i, &v) in values.iter().enumerate() {
        validate(v, &format!("{axis}[{i}]"))?;
    }
    Ok(())
}

fn validate_range(min: f64, max: f64, axis: &str) -> Result<(), DrawError> {
    validate(min, &format!("{axis}min"))?;
    validate(max, &format!("{axis}max"))?;
    if min == max {
        return Err(DrawError::invalid(format!("the {axis}min and {axis}max are the same")));
    }
    Ok(())
}

fn validate_config(config: &DrawConfig) -> Result<(), DrawError> {
    if config.width == 0 {
        return Err(DrawError::invalid("width must be positive"));
    }
    if config.height == 0 {
        return Err(DrawError::invalid("height must be positive"));
    }
    validate_range(config.x_scale.0, config.x_scale.1, "x")?;
    validate_range(config.y_scale.0, config.y_scale.1, "y")?;
    validate_nonnegative(config.pen_radius, "pen radius")?;
    if config.font.size == 0 {
        return Err(DrawError::invalid("font size must be positive"));
    }
    Ok(())
}

// ── user scale ────────────────────────────────────────────────────────────

/// User-space window mapped onto the canvas. y grows upward.
#[derive(Debug, Copy, Clone, PartialEq)]
struct UserScale {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl UserScale {
    fn from_config(config: &DrawConfig) -> Self {
        Self {
            xmin: config.x_scale.0,
            xmax: config.x_scale.1,
            ymin: config.y_scale.0,
            ymax: config.y_scale.1,
        }
    }
}

// ── facade ────────────────────────────────────────────────────────────────

/// A drawing session: one canvas, one window, one rendering thread.
///
/// ```no_run
/// use stddraw::{DrawConfig, NamedColor, StdDraw};
///
/// let mut draw = StdDraw::new(DrawConfig::default())?;
/// draw.set_pen_color(NamedColor::BookBlue);
/// draw.filled_circle(0.5, 0.5, 0.25)?;
/// draw.wait()?;
/// # Ok::<(), stddraw::DrawError>(())
/// ```
pub struct StdDraw<B: Backend = WinitBackend> {
    render: Arc<Render<B>>,
    config: DrawConfig,
    scale: UserScale,

    started: bool,
    thread: Option<JoinHandle<Result<(), DrawError>>>,
}

impl StdDraw<WinitBackend> {
    /// Session drawing into a native window.
    pub fn new(config: DrawConfig) -> Result<Self, DrawError> {
        Self::with_backend(WinitBackend::new(), config)
    }
}

impl<B: Backend> StdDraw<B> {
    pub fn with_backend(backend: B, config: DrawConfig) -> Result<Self, DrawError> {
        validate_config(&config)?;
        Ok(Self {
            render: Arc::new(Render::new(backend, &config)),
            scale: UserScale::from_config(&config),
            config,
            started: false,
            thread: None,
        })
    }

    #[inline]
    pub fn render(&self) -> &Render<B> {
        &self.render
    }

    // ── canvas ────────────────────────────────────────────────────────────

    /// Sets the canvas size in device pixels. Only a window that has not been
    /// created yet picks the new size up; call before the first drawing call.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<(), DrawError> {
        if width == 0 {
            return Err(DrawError::invalid("width must be positive"));
        }
        if height == 0 {
            return Err(DrawError::invalid("height must be positive"));
        }
        self.render.set_canvas_size(width, height);
        Ok(())
    }

    pub fn reset_canvas_size(&mut self) {
        self.render.set_canvas_size(self.config.width, self.config.height);
    }

    pub fn canvas_size(&self) -> Canvas {
        self.render.canvas_size()
    }

    // ── user scale ────────────────────────────────────────────────────────

    pub fn set_x_scale(&mut self, min: f64, max: f64) -> Result<(), DrawError> {
        validate_range(min, max, "x")?;
        self.scale.xmin = min;
        self.scale.xmax = max;
        Ok(())
    }

    pub fn set_y_scale(&mut self, min: f64, max: f64) -> Result<(), DrawError> {
        validate_range(min, max, "y")?;
        self.scale.ymin = min;
        self.scale.ymax = max;
        Ok(())
    }

    /// Same range on both axes.
    pub fn set_scale(&mut self, min: f64, max: f64) -> Result<(), DrawError> {
        validate_range(min, max, "")?;
        self.scale = UserScale { xmin: min, xmax: max, ymin: min, ymax: max };
        Ok(())
    }

    pub fn reset_scale(&mut self) {
        self.scale = UserScale::from_config(&self.config);
    }

    // ── transforms ────────────────────────────────────────────────────────

    /// User x to device x.
    pub fn scale_x(&self, x: f64) -> f64 {
        let UserScale { xmin, xmax, .. } = self.scale;
        self.canvas_size().width as f64 * (x - xmin) / (xmax - xmin)
    }

    /// User y to device y. Device y grows downward.
    pub fn scale_y(&self, y: f64) -> f64 {
        let UserScale { ymin, ymax, .. } = self.scale;
        self.canvas_size().height as f64 * (ymax - y) / (ymax - ymin)
    }

    /// User width to device width.
    pub fn factor_x(&self, w: f64) -> f64 {
        let UserScale { xmin, xmax, .. } = self.scale;
        w * self.canvas_size().width as f64 / (xmax - xmin).abs()
    }

    /// User height to device height.
    pub fn factor_y(&self, h: f64) -> f64 {
        let UserScale { ymin, ymax, .. } = self.scale;
        h * self.canvas_size().height as f64 / (ymax - ymin).abs()
    }

    /// Device x to user x.
    pub fn user_x(&self, x: f64) -> f64 {
        let UserScale { xmin, xmax, .. } = self.scale;
        xmin + x * (xmax - xmin) / self.canvas_size().width as f64
    }

    /// Device y to user y.
    pub fn user_y(&self, y: f64) -> f64 {
        let UserScale { ymin, ymax, .. } = self.scale;
        ymax - y * (ymax - ymin) / self.canvas_size().height as f64
    }

    fn device_point(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(self.scale_x(x) as f32, self.scale_y(y) as f32)
    }

    /// Device box of half-extents `(rx, ry)` centred on user `(x, y)`, or
    /// `None` when it rounds down to a single pixel.
    fn device_box(&self, x: f64, y: f64, rx: f64, ry: f64) -> Option<Rect> {
        let xs = self.scale_x(x);
        let ys = self.scale_y(y);
        let ws = self.factor_x(2.0 * rx);
        let hs = self.factor_y(2.0 * ry);
        if ws.round() <= 1.0 && hs.round() <= 1.0 {
            return None;
        }
        Some(Rect::new((xs - ws / 2.0) as f32, (ys - hs / 2.0) as f32, ws as f32, hs as f32))
    }

    // ── pen ───────────────────────────────────────────────────────────────

    pub fn pen_radius(&self) -> f64 {
        self.render.pen().radius
    }

    pub fn set_pen_radius(&mut self, radius: f64) -> Result<(), DrawError> {
        validate_nonnegative(radius, "pen radius")?;
        let pen = self.render.pen();
        self.render.set_pen(Pen { radius, ..pen });
        Ok(())
    }

    pub fn reset_pen_radius(&mut self) {
        let pen = self.render.pen();
        self.render.set_pen(Pen { radius: self.config.pen_radius, ..pen });
    }

    /// Named color matching the pen's RGB exactly, if any.
    pub fn pen_color(&self) -> Option<NamedColor> {
        let Rgba { r, g, b, .. } = self.render.pen().color;
        NamedColor::from_rgb(r, g, b)
    }

    pub fn pen_rgba(&self) -> Rgba {
        self.render.pen().color
    }

    pub fn set_pen_color(&mut self, color: NamedColor) {
        let pen = self.render.pen();
        self.render.set_pen(Pen { color: color.rgba(), ..pen });
    }

    /// Sets the pen's RGB channels, keeping its alpha.
    pub fn set_pen_rgb(&mut self, red: i32, green: i32, blue: i32) -> Result<(), DrawError> {
        let r = validate_channel(red, "red")?;
        let g = validate_channel(green, "green")?;
        let b = validate_channel(blue, "blue")?;

        let pen = self.render.pen();
        let color = Rgba { r, g, b, a: pen.color.a };
        self.render.set_pen(Pen { color, ..pen });
        Ok(())
    }

    pub fn reset_pen_color(&mut self) {
        let pen = self.render.pen();
        self.render.set_pen(Pen { color: self.config.pen_color, ..pen });
    }

    // ── font ──────────────────────────────────────────────────────────────

    pub fn font(&self) -> Font {
        self.render.font()
    }

    pub fn set_font(&mut self, font: Font) -> Result<(), DrawError> {
        if font.size == 0 {
            return Err(DrawError::invalid("font size must be positive"));
        }
        self.render.set_font(font);
        Ok(())
    }

    pub fn reset_font(&mut self) {
        self.render.set_font(self.config.font.clone());
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<(), DrawError> {
        validate(x0, "x0")?;
        validate(y0, "y0")?;
        validate(x1, "x1")?;
        validate(y1, "y1")?;

        self.render.record_line(self.device_point(x0, y0), self.device_point(x1, y1));
        self.ensure_started()
    }

    /// One device pixel at `(x, y)`.
    pub fn point(&mut self, x: f64, y: f64) -> Result<(), DrawError> {
        validate(x, "x")?;
        validate(y, "y")?;

        self.record_pixel(x, y);
        self.ensure_started()
    }

    pub fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), DrawError> {
        self.ellipse_shape(x, y, radius, radius, "radius", "radius", FillMode::Outline)
    }

    pub fn filled_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), DrawError> {
        self.ellipse_shape(x, y, radius, radius, "radius", "radius", FillMode::Filled)
    }

    /// Axis-aligned ellipse with semi-axes `semi_major` (x) and `semi_minor` (y).
    pub fn ellipse(&mut self, x: f64, y: f64, semi_major: f64, semi_minor: f64) -> Result<(), DrawError> {
        self.ellipse_shape(x, y, semi_major, semi_minor, "semimajor axis", "semiminor axis", FillMode::Outline)
    }

    pub fn filled_ellipse(
        &mut self,
        x: f64,
        y: f64,
        semi_major: f64,
        semi_minor: f64,
    ) -> Result<(), DrawError> {
        self.ellipse_shape(x, y, semi_major, semi_minor, "semimajor axis", "semiminor axis", FillMode::Filled)
    }

    /// Circular arc from `angle1` to `angle2` degrees, counter-clockwise from
    /// 3 o'clock. `angle2` is advanced by whole turns until it is at least
    /// `angle1`.
    pub fn arc(&mut self, x: f64, y: f64, radius: f64, angle1: f64, angle2: f64) -> Result<(), DrawError> {
        validate(x, "x")?;
        validate(y, "y")?;
        validate_nonnegative(radius, "arc radius")?;
        validate(angle1, "angle1")?;
        validate(angle2, "angle2")?;

        let mut angle2 = angle2;
        if angle2 < angle1 {
            angle2 += ((angle1 - angle2) / 360.0).ceil() * 360.0;
        }

        match self.device_box(x, y, radius, radius) {
            Some(bounds) => self.render.record_arc(bounds, angle1 as f32, (angle2 - angle1) as f32),
            None => self.record_pixel(x, y),
        }
        self.ensure_started()
    }

    pub fn square(&mut self, x: f64, y: f64, half_length: f64) -> Result<(), DrawError> {
        self.rectangle_shape(x, y, half_length, half_length, "half length", "half length", FillMode::Outline)
    }

    pub fn filled_square(&mut self, x: f64, y: f64, half_length: f64) -> Result<(), DrawError> {
        self.rectangle_shape(x, y, half_length, half_length, "half length", "half length", FillMode::Filled)
    }

    pub fn rectangle(&mut self, x: f64, y: f64, half_width: f64, half_height: f64) -> Result<(), DrawError> {
        self.rectangle_shape(x, y, half_width, half_height, "half width", "half height", FillMode::Outline)
    }

    pub fn filled_rectangle(
        &mut self,
        x: f64,
        y: f64,
        half_width: f64,
        half_height: f64,
    ) -> Result<(), DrawError> {
        self.rectangle_shape(x, y, half_width, half_height, "half width", "half height", FillMode::Filled)
    }

    /// Closed polygon through `(xs[i], ys[i])`. Two empty slices draw nothing.
    pub fn polygon(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), DrawError> {
        self.polygon_shape(xs, ys, FillMode::Outline)
    }

    pub fn filled_polygon(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), DrawError> {
        self.polygon_shape(xs, ys, FillMode::Filled)
    }

    /// Text centred horizontally on `x`, bottom edge on `y`.
    pub fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), DrawError> {
        self.text_shape(x, y, text, |w| w / 2.0)
    }

    /// Text whose left edge is at `x`, bottom edge on `y`.
    pub fn text_left(&mut self, x: f64, y: f64, text: &str) -> Result<(), DrawError> {
        self.text_shape(x, y, text, |_| 0.0)
    }

    /// Text whose right edge is at `x`, bottom edge on `y`.
    pub fn text_right(&mut self, x: f64, y: f64, text: &str) -> Result<(), DrawError> {
        self.text_shape(x, y, text, |w| w)
    }

    #[allow(clippy::too_many_arguments)]
    fn ellipse_shape(
        &mut self,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        rx_name: &str,
        ry_name: &str,
        fill: FillMode,
    ) -> Result<(), DrawError> {
        validate(x, "x")?;
        validate(y, "y")?;
        validate_nonnegative(rx, rx_name)?;
        validate_nonnegative(ry, ry_name)?;

        match self.device_box(x, y, rx, ry) {
            Some(bounds) => self.render.record_ellipse(bounds, fill),
            None => self.record_pixel(x, y),
        }
        self.ensure_started()
    }

    #[allow(clippy::too_many_arguments)]
    fn rectangle_shape(
        &mut self,
        x: f64,
        y: f64,
        half_w: f64,
        half_h: f64,
        w_name: &str,
        h_name: &str,
        fill: FillMode,
    ) -> Result<(), DrawError> {
        validate(x, "x")?;
        validate(y, "y")?;
        validate_nonnegative(half_w, w_name)?;
        validate_nonnegative(half_h, h_name)?;

        match self.device_box(x, y, half_w, half_h) {
            Some(bounds) => self.render.record_rectangle(bounds, fill),
            None => self.record_pixel(x, y),
        }
        self.ensure_started()
    }

    fn polygon_shape(&mut self, xs: &[f64], ys: &[f64], fill: FillMode) -> Result<(), DrawError> {
        if xs.is_empty() && ys.is_empty() {
            return Ok(());
        }
        validate_coords(xs, "x")?;
        validate_coords(ys, "y")?;
        if xs.len() != ys.len() {
            return Err(DrawError::invalid("arrays must be of the same length"));
        }

        let dxs: Vec<f32> = xs.iter().map(|&x| self.scale_x(x) as f32).collect();
        let dys: Vec<f32> = ys.iter().map(|&y| self.scale_y(y) as f32).collect();
        self.render.record_polygon(&dxs, &dys, fill);
        self.ensure_started()
    }

    /// `x_offset` maps the measured width to the distance from the anchor
    /// to the text's left edge.
    fn text_shape(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        x_offset: impl FnOnce(f64) -> f64,
    ) -> Result<(), DrawError> {
        validate(x, "x")?;
        validate(y, "y")?;

        let (w, h) = self.render.measure_text(text);
        let origin = Vec2::new(
            (self.scale_x(x) - x_offset(w)) as f32,
            (self.scale_y(y) - h) as f32,
        );
        self.render.record_text(text, origin);
        self.ensure_started()
    }

    /// 1×1 filled rectangle at the rounded device point.
    fn record_pixel(&self, x: f64, y: f64) {
        let bounds = Rect::new(self.scale_x(x).round() as f32, self.scale_y(y).round() as f32, 1.0, 1.0);
        self.render.record_rectangle(bounds, FillMode::Filled);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Starts the rendering thread on the first drawing call.
    fn ensure_started(&mut self) -> Result<(), DrawError> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        let render = Arc::clone(&self.render);
        let handle = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || {
                log::debug!("render thread started");
                let result = render.show();
                if let Err(err) = &result {
                    log::error!("render thread failed: {err}");
                }
                log::debug!("render thread exiting");
                result
            })
            .map_err(|e| DrawError::RenderThread(e.to_string()))?;

        self.thread = Some(handle);
        Ok(())
    }

    /// `true` from the first drawing call until the window has closed.
    pub fn is_open(&self) -> bool {
        self.started && self.render.session_state() != SessionState::Closed
    }

    /// Blocks until the user closes the window and returns how the rendering
    /// thread ended. Returns at once if nothing was drawn.
    pub fn wait(&mut self) -> Result<(), DrawError> {
        let Some(handle) = self.thread.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(result) => result,
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "panicked".to_string());
                Err(DrawError::RenderThread(msg))
            }
        }
    }

    /// Closes the window and joins the rendering thread.
    pub fn close(&mut self) -> Result<(), DrawError> {
        self.render.close();
        self.wait()
    }

    /// Snapshot of everything recorded so far, in paint order.
    pub fn shapes(&self) -> Vec<Arc<Shape>> {
        self.render.shapes()
    }
}

impl<B: Backend> Drop for StdDraw<B> {
    fn drop(&mut self) {
        if self.thread.is_none() {
            return;
        }
        let result = if self.config.close_on_drop { self.close() } else { self.wait() };
        if let Err(err) = result {
            log::error!("drawing session ended with an error: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use stddraw_engine::headless::{HeadlessBackend, HeadlessController, SurfaceOp};
    use stddraw_engine::EngineError;

    use crate::shape::{ArcShape, EllipseShape, LineShape, PolygonShape, RectangleShape, TextShape};
    use crate::style::FontStyle;

    const TIMEOUT: Duration = Duration::from_secs(5);
    const EPS: f64 = 1e-9;

    fn session(config: DrawConfig) -> (StdDraw<HeadlessBackend>, HeadlessController) {
        let (backend, ctl) = HeadlessBackend::new();
        (StdDraw::with_backend(backend, config).unwrap(), ctl)
    }

    fn canvas(size: u32) -> (StdDraw<HeadlessBackend>, HeadlessController) {
        session(DrawConfig::default().with_canvas_size(size, size))
    }

    fn is_invalid<T>(result: Result<T, DrawError>) -> bool {
        matches!(result, Err(DrawError::InvalidArgument(_)))
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn transform_round_trips() {
        let (mut draw, _ctl) = canvas(300);
        draw.set_x_scale(-2.0, 5.0).unwrap();
        draw.set_y_scale(10.0, -3.0).unwrap();

        for &v in &[-2.0, -1.3, 0.0, 0.25, 1.0, 4.999, 5.0] {
            let xs = draw.scale_x(v);
            assert!((draw.scale_x(draw.user_x(xs)) - xs).abs() < EPS);
            let ys = draw.scale_y(v);
            assert!((draw.scale_y(draw.user_y(ys)) - ys).abs() < EPS);
        }
    }

    #[test]
    fn scale_flips_the_y_axis() {
        let (draw, _ctl) = canvas(100);
        assert_eq!(draw.scale_x(0.0), 0.0);
        assert_eq!(draw.scale_x(1.0), 100.0);
        assert_eq!(draw.scale_y(0.0), 100.0);
        assert_eq!(draw.scale_y(1.0), 0.0);
        assert_eq!(draw.factor_x(0.5), 50.0);
        assert_eq!(draw.factor_y(0.25), 25.0);
    }

    #[test]
    fn degenerate_scales_are_rejected() {
        let (mut draw, _ctl) = canvas(100);
        assert!(is_invalid(draw.set_x_scale(1.0, 1.0)));
        assert!(is_invalid(draw.set_y_scale(f64::NAN, 1.0)));
        assert!(is_invalid(draw.set_scale(0.0, f64::INFINITY)));

        draw.set_scale(0.0, 10.0).unwrap();
        assert_eq!(draw.scale_x(5.0), 50.0);
        draw.reset_scale();
        assert_eq!(draw.scale_x(0.5), 50.0);
    }

    #[test]
    fn line_maps_corners_with_y_flip() {
        let (mut draw, ctl) = canvas(100);
        draw.line(0.0, 0.0, 1.0, 1.0).unwrap();

        let shapes = draw.shapes();
        assert_eq!(shapes.len(), 1);
        match shapes[0].as_ref() {
            Shape::Line(LineShape { from, to, .. }) => {
                assert_eq!(*from, Vec2::new(0.0, 100.0));
                assert_eq!(*to, Vec2::new(100.0, 0.0));
            }
            other => panic!("expected a line, got {other:?}"),
        }

        ctl.close();
        draw.wait().unwrap();
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn negative_pen_radius_is_rejected() {
        let (mut draw, _ctl) = canvas(100);
        for r in [-0.001, -1.0, f64::NEG_INFINITY] {
            assert!(is_invalid(draw.set_pen_radius(r)));
        }
        assert_eq!(draw.pen_radius(), 0.002);

        for r in [0.0, 0.01, 3.5] {
            draw.set_pen_radius(r).unwrap();
            assert_eq!(draw.pen_radius(), r);
        }
        draw.reset_pen_radius();
        assert_eq!(draw.pen_radius(), 0.002);
    }

    #[test]
    fn invalid_arguments_record_nothing() {
        let (mut draw, ctl) = canvas(100);
        assert_eq!(
            draw.line(f64::NAN, 0.0, 1.0, 1.0),
            Err(DrawError::InvalidArgument("x0 is NaN".to_string()))
        );
        assert_eq!(
            draw.circle(0.5, f64::INFINITY, 0.1),
            Err(DrawError::InvalidArgument("y is infinite".to_string()))
        );
        assert_eq!(
            draw.circle(0.5, 0.5, -0.1),
            Err(DrawError::InvalidArgument("radius negative".to_string()))
        );
        assert!(is_invalid(draw.square(0.5, 0.5, -1.0)));
        assert!(is_invalid(draw.filled_rectangle(0.5, 0.5, 0.1, -0.1)));
        assert!(is_invalid(draw.arc(0.5, 0.5, 0.1, f64::NAN, 90.0)));
        assert!(is_invalid(draw.text(f64::NAN, 0.5, "x")));

        assert!(draw.shapes().is_empty());
        assert!(!draw.is_open());
        assert_eq!(ctl.windows_created(), 0);
    }

    #[test]
    fn mismatched_polygon_is_rejected_without_recording() {
        let (mut draw, _ctl) = canvas(100);
        assert_eq!(
            draw.polygon(&[0.1, 0.2, 0.3], &[0.1, 0.2]),
            Err(DrawError::InvalidArgument("arrays must be of the same length".to_string()))
        );
        assert!(is_invalid(draw.filled_polygon(&[0.1], &[0.1, 0.2])));
        assert_eq!(
            draw.polygon(&[0.1, f64::NAN], &[0.1, 0.2]),
            Err(DrawError::InvalidArgument("x[1] is NaN".to_string()))
        );
        assert!(draw.shapes().is_empty());
    }

    #[test]
    fn empty_polygon_is_a_no_op() {
        let (mut draw, _ctl) = canvas(100);
        draw.polygon(&[], &[]).unwrap();
        draw.filled_polygon(&[], &[]).unwrap();
        assert!(draw.shapes().is_empty());
        assert!(!draw.is_open());
    }

    #[test]
    fn one_empty_coordinate_slice_is_a_length_mismatch() {
        let (mut draw, _ctl) = canvas(100);
        assert_eq!(
            draw.polygon(&[], &[0.5, 0.5]),
            Err(DrawError::InvalidArgument("arrays must be of the same length".to_string()))
        );
        assert!(is_invalid(draw.filled_polygon(&[], &[1.0])));
        assert!(is_invalid(draw.polygon(&[0.5], &[])));
        assert!(draw.shapes().is_empty());
        assert!(!draw.is_open());
    }

    #[test]
    fn canvas_and_font_must_be_positive() {
        let (mut draw, _ctl) = canvas(100);
        assert!(is_invalid(draw.set_canvas_size(0, 10)));
        assert!(is_invalid(draw.set_font(Font::new("Serif", FontStyle::Bold, 0))));

        draw.set_canvas_size(640, 480).unwrap();
        assert_eq!(draw.canvas_size(), Canvas { width: 640, height: 480 });
        draw.reset_canvas_size();
        assert_eq!(draw.canvas_size(), Canvas { width: 100, height: 100 });
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (backend, _ctl) = HeadlessBackend::new();
        let config = DrawConfig::default().with_x_scale(2.0, 2.0);
        assert!(is_invalid(StdDraw::with_backend(backend, config)));
    }

    // ── pen & font ────────────────────────────────────────────────────────

    #[test]
    fn pen_color_lookup_requires_an_exact_match() {
        let (mut draw, _ctl) = canvas(100);
        draw.set_pen_rgb(255, 0, 0).unwrap();
        assert_eq!(draw.pen_color(), Some(NamedColor::Red));

        draw.set_pen_rgb(254, 0, 0).unwrap();
        assert_eq!(draw.pen_color(), None);
        assert_eq!(draw.pen_rgba(), Rgba::new(254, 0, 0));

        draw.reset_pen_color();
        assert_eq!(draw.pen_color(), Some(NamedColor::Black));
    }

    #[test]
    fn pen_channels_must_be_bytes() {
        let (mut draw, _ctl) = canvas(100);
        assert_eq!(
            draw.set_pen_rgb(256, 0, 0),
            Err(DrawError::InvalidArgument("red must be between 0 and 255".to_string()))
        );
        assert!(is_invalid(draw.set_pen_rgb(0, -1, 0)));
        assert!(is_invalid(draw.set_pen_rgb(0, 0, 1000)));
        assert_eq!(draw.pen_color(), Some(NamedColor::Black));
    }

    #[test]
    fn recorded_shapes_keep_their_pen() {
        let (mut draw, ctl) = canvas(100);
        draw.line(0.0, 0.0, 1.0, 1.0).unwrap();
        draw.set_pen_color(NamedColor::BookRed);
        draw.set_pen_radius(0.02).unwrap();
        draw.line(1.0, 0.0, 0.0, 1.0).unwrap();

        let shapes = draw.shapes();
        assert_eq!(shapes[0].pen().color, NamedColor::Black.rgba());
        assert_eq!(shapes[0].pen().radius, 0.002);
        assert_eq!(shapes[1].pen().color, NamedColor::BookRed.rgba());
        assert_eq!(shapes[1].pen().radius, 0.02);

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn font_is_reset_to_the_configured_default() {
        let (mut draw, _ctl) = canvas(100);
        let font = Font::new("Serif", FontStyle::BoldItalic, 24);
        draw.set_font(font.clone()).unwrap();
        assert_eq!(draw.font(), font);
        draw.reset_font();
        assert_eq!(draw.font(), Font::default());
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn tiny_circle_becomes_a_pixel() {
        let (mut draw, ctl) = canvas(100);
        draw.circle(0.5, 0.5, 0.001).unwrap();

        let shapes = draw.shapes();
        assert_eq!(shapes.len(), 1);
        match shapes[0].as_ref() {
            Shape::Rectangle(RectangleShape { bounds, fill, .. }) => {
                assert_eq!(*fill, FillMode::Filled);
                assert_eq!(*bounds, Rect::new(50.0, 50.0, 1.0, 1.0));
            }
            other => panic!("expected a pixel, got {other:?}"),
        }

        ctl.close();
        draw.wait().unwrap();
    }

    fn pixel_bounds(shape: &Shape) -> Option<Rect> {
        match shape {
            Shape::Rectangle(RectangleShape { bounds, fill: FillMode::Filled, .. })
                if bounds.size == Vec2::new(1.0, 1.0) =>
            {
                Some(*bounds)
            }
            _ => None,
        }
    }

    #[test]
    fn tiny_arc_becomes_a_pixel() {
        let (mut draw, ctl) = canvas(100);
        draw.arc(0.5, 0.5, 0.001, 0.0, 90.0).unwrap();

        let shapes = draw.shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(pixel_bounds(&shapes[0]), Some(Rect::new(50.0, 50.0, 1.0, 1.0)));

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn tiny_squares_become_pixels() {
        let (mut draw, ctl) = canvas(100);
        draw.square(0.25, 0.75, 0.003).unwrap();
        draw.filled_square(0.25, 0.75, 0.003).unwrap();
        draw.rectangle(0.5, 0.5, 0.002, 0.004).unwrap();

        let pixels: Vec<Option<Rect>> = draw.shapes().iter().map(|s| pixel_bounds(s)).collect();
        assert_eq!(
            pixels,
            vec![
                Some(Rect::new(25.0, 25.0, 1.0, 1.0)),
                Some(Rect::new(25.0, 25.0, 1.0, 1.0)),
                Some(Rect::new(50.0, 50.0, 1.0, 1.0)),
            ]
        );

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn pixel_substitution_rounds_the_device_size() {
        let (mut draw, ctl) = canvas(100);
        // 1.4 device pixels rounds down to one.
        draw.rectangle(0.5, 0.5, 0.007, 0.007).unwrap();
        // 1.6 rounds up to two and keeps the rectangle.
        draw.rectangle(0.5, 0.5, 0.008, 0.008).unwrap();
        // Only one thin side is not enough.
        draw.rectangle(0.5, 0.5, 0.2, 0.001).unwrap();

        let shapes = draw.shapes();
        assert_eq!(shapes.len(), 3);
        assert_eq!(pixel_bounds(&shapes[0]), Some(Rect::new(50.0, 50.0, 1.0, 1.0)));
        for shape in &shapes[1..] {
            match shape.as_ref() {
                Shape::Rectangle(RectangleShape { fill, .. }) => assert_eq!(*fill, FillMode::Outline),
                other => panic!("expected an outlined rectangle, got {other:?}"),
            }
        }
        match shapes[1].as_ref() {
            Shape::Rectangle(RectangleShape { bounds, .. }) => {
                assert!((bounds.size.x - 1.6).abs() < 1e-4);
                assert!((bounds.origin.x - 49.2).abs() < 1e-4);
            }
            other => panic!("expected a rectangle, got {other:?}"),
        }

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn circle_is_centred_on_its_bounding_box() {
        let (mut draw, ctl) = canvas(100);
        draw.filled_circle(0.5, 0.5, 0.25).unwrap();
        draw.ellipse(0.5, 0.5, 0.25, 0.1).unwrap();

        let shapes = draw.shapes();
        match shapes[0].as_ref() {
            Shape::Ellipse(EllipseShape { bounds, fill, .. }) => {
                assert_eq!(*fill, FillMode::Filled);
                assert_eq!(*bounds, Rect::new(25.0, 25.0, 50.0, 50.0));
            }
            other => panic!("expected an ellipse, got {other:?}"),
        }
        match shapes[1].as_ref() {
            Shape::Ellipse(EllipseShape { bounds, fill, .. }) => {
                assert_eq!(*fill, FillMode::Outline);
                assert_eq!(*bounds, Rect::new(25.0, 40.0, 50.0, 20.0));
            }
            other => panic!("expected an ellipse, got {other:?}"),
        }

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn squares_and_rectangles_use_half_extents() {
        let (mut draw, ctl) = canvas(100);
        draw.square(0.2, 0.8, 0.1).unwrap();
        draw.filled_rectangle(0.5, 0.5, 0.2, 0.1).unwrap();

        let bounds: Vec<(Rect, FillMode)> = draw
            .shapes()
            .iter()
            .map(|s| match s.as_ref() {
                Shape::Rectangle(RectangleShape { bounds, fill, .. }) => (*bounds, *fill),
                other => panic!("expected a rectangle, got {other:?}"),
            })
            .collect();
        assert_eq!(bounds[0].1, FillMode::Outline);
        assert!((bounds[0].0.origin.x - 10.0).abs() < 1e-4);
        assert!((bounds[0].0.origin.y - 10.0).abs() < 1e-4);
        assert!((bounds[0].0.size.x - 20.0).abs() < 1e-4);
        assert_eq!(bounds[1], (Rect::new(30.0, 40.0, 40.0, 20.0), FillMode::Filled));

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn arc_end_angle_wraps_forward() {
        let (mut draw, ctl) = canvas(100);
        draw.arc(0.5, 0.5, 0.25, 200.0, 45.0).unwrap();
        draw.arc(0.5, 0.5, 0.25, 10.0, -1000.0).unwrap();
        draw.arc(0.5, 0.5, 0.25, 0.0, 90.0).unwrap();

        let sweeps: Vec<(f32, f32)> = draw
            .shapes()
            .iter()
            .map(|s| match s.as_ref() {
                Shape::Arc(ArcShape { start_deg, sweep_deg, .. }) => (*start_deg, *sweep_deg),
                other => panic!("expected an arc, got {other:?}"),
            })
            .collect();
        assert_eq!(sweeps, vec![(200.0, 205.0), (10.0, 70.0), (0.0, 90.0)]);

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn arc_is_painted_clockwise_on_the_surface() {
        let (mut draw, ctl) = canvas(100);
        draw.arc(0.5, 0.5, 0.25, 30.0, 120.0).unwrap();

        let frame = ctl
            .wait_for_frame_where(TIMEOUT, |f| !f.is_empty())
            .expect("frame with the arc");
        match &frame[0] {
            SurfaceOp::Arc { start_deg, sweep_deg, .. } => {
                assert_eq!((*start_deg, *sweep_deg), (-30.0, -90.0));
            }
            other => panic!("expected an arc, got {other:?}"),
        }

        draw.close().unwrap();
    }

    #[test]
    fn polygon_is_transformed_point_by_point() {
        let (mut draw, ctl) = canvas(100);
        draw.filled_polygon(&[0.1, 0.2, 0.3, 0.2], &[0.2, 0.3, 0.2, 0.1]).unwrap();

        match draw.shapes()[0].as_ref() {
            Shape::Polygon(PolygonShape { points, fill, .. }) => {
                assert_eq!(*fill, FillMode::Filled);
                let expected = [(10.0, 80.0), (20.0, 70.0), (30.0, 80.0), (20.0, 90.0)];
                assert_eq!(points.len(), expected.len());
                for (p, (x, y)) in points.iter().zip(expected) {
                    assert!((p.x - x).abs() < 1e-4 && (p.y - y).abs() < 1e-4, "{p:?}");
                }
            }
            other => panic!("expected a polygon, got {other:?}"),
        }

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn text_is_anchored_by_its_measured_extent() {
        // Headless metric: 16px font, "abcd" is 32x16.
        let (mut draw, ctl) = canvas(100);
        draw.text(0.5, 0.5, "abcd").unwrap();
        draw.text_left(0.5, 0.5, "abcd").unwrap();
        draw.text_right(0.5, 0.5, "abcd").unwrap();

        let origins: Vec<Vec2> = draw
            .shapes()
            .iter()
            .map(|s| match s.as_ref() {
                Shape::Text(TextShape { origin, .. }) => *origin,
                other => panic!("expected text, got {other:?}"),
            })
            .collect();
        assert_eq!(
            origins,
            vec![Vec2::new(34.0, 34.0), Vec2::new(50.0, 34.0), Vec2::new(18.0, 34.0)]
        );

        ctl.close();
        draw.wait().unwrap();
    }

    #[test]
    fn point_is_a_single_pixel() {
        let (mut draw, ctl) = canvas(100);
        draw.point(0.333, 0.5).unwrap();
        match draw.shapes()[0].as_ref() {
            Shape::Rectangle(RectangleShape { bounds, .. }) => {
                assert_eq!(*bounds, Rect::new(33.0, 50.0, 1.0, 1.0));
            }
            other => panic!("expected a pixel, got {other:?}"),
        }
        ctl.close();
        draw.wait().unwrap();
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn rendering_thread_starts_once_on_first_draw() {
        let (mut draw, ctl) = canvas(100);
        assert!(!draw.is_open());

        draw.line(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(draw.is_open());
        draw.circle(0.5, 0.5, 0.2).unwrap();
        draw.filled_square(0.5, 0.5, 0.1).unwrap();

        let frame = ctl.wait_for_frame_where(TIMEOUT, |f| f.len() == 3);
        assert!(frame.is_some());
        assert_eq!(ctl.windows_created(), 1);

        ctl.close();
        assert_eq!(draw.wait(), Ok(()));
        assert!(!draw.is_open());
        assert_eq!(ctl.windows_created(), 1);
    }

    #[test]
    fn frames_paint_in_record_order() {
        let (mut draw, ctl) = canvas(100);
        draw.filled_square(0.5, 0.5, 0.4).unwrap();
        draw.set_pen_color(NamedColor::White);
        draw.line(0.0, 0.0, 1.0, 1.0).unwrap();

        let frame = ctl
            .wait_for_frame_where(TIMEOUT, |f| f.len() == 2)
            .expect("frame with both shapes");
        assert!(matches!(
            frame.as_slice(),
            [SurfaceOp::FillRectangle { .. }, SurfaceOp::Line { .. }]
        ));

        draw.close().unwrap();
    }

    #[test]
    fn user_close_then_drop_does_not_hang() {
        let (mut draw, ctl) = session(DrawConfig::default().with_close_on_drop(false));
        draw.circle(0.5, 0.5, 0.1).unwrap();
        assert!(ctl.wait_for_frames(1, TIMEOUT));

        ctl.close();
        drop(draw);
        assert_eq!(ctl.windows_created(), 1);
    }

    #[test]
    fn drop_closes_the_window_by_default() {
        let (mut draw, ctl) = canvas(100);
        draw.circle(0.5, 0.5, 0.1).unwrap();
        assert!(ctl.wait_for_frames(1, TIMEOUT));

        let render = Arc::clone(&draw.render);
        drop(draw);
        assert_eq!(render.session_state(), SessionState::Closed);
    }

    #[test]
    fn wait_without_drawing_returns_immediately() {
        let (mut draw, ctl) = canvas(100);
        assert_eq!(draw.wait(), Ok(()));
        assert_eq!(draw.close(), Ok(()));
        assert_eq!(ctl.windows_created(), 0);
    }

    #[test]
    fn backend_failure_is_reported_by_wait() {
        let (mut draw, ctl) = canvas(100);
        ctl.fail_window_creation(EngineError::Window("no display".to_string()));
        draw.line(0.0, 0.0, 1.0, 1.0).unwrap();

        assert_eq!(
            draw.wait(),
            Err(DrawError::Backend(EngineError::Window("no display".to_string())))
        );
        assert!(!draw.is_open());
    }

    #[test]
    fn shapes_recorded_after_close_are_kept() {
        let (mut draw, ctl) = canvas(100);
        draw.line(0.0, 0.0, 1.0, 1.0).unwrap();
        ctl.close();
        draw.wait().unwrap();

        draw.line(1.0, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(draw.shapes().len(), 2);
        assert_eq!(ctl.windows_created(), 1);
    }
}
