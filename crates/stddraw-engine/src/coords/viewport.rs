/// Drawable area in logical pixels; the basis for the shaders' NDC mapping.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical size of a `width`×`height` physical surface at `scale_factor`.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new((width as f64 / scale) as f32, (height as f64 / scale) as f32)
    }
}
