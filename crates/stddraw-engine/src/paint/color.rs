/// Premultiplied RGBA color, channels in `[0, 1]`.
///
/// Channels keep the encoding the caller supplied (8-bit sRGB bytes over
/// 255). The GPU backend renders to a non-sRGB surface, so they show unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Premultiplies straight RGBA bytes.
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a = a as f32 / 255.0;
        let channel = |c: u8| c as f32 / 255.0 * a;
        Self { r: channel(r), g: channel(g), b: channel(b), a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_magenta_keeps_its_bytes() {
        let c = Color::from_rgba_u8(255, 0, 255, 255);
        assert_eq!(c, Color { r: 1.0, g: 0.0, b: 1.0, a: 1.0 });
    }

    #[test]
    fn zero_alpha_pen_paints_nothing() {
        assert_eq!(Color::from_rgba_u8(255, 255, 255, 0).to_array(), [0.0; 4]);
    }

    #[test]
    fn half_alpha_halves_the_channels() {
        let c = Color::from_rgba_u8(255, 0, 0, 51);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert!((c.a - 0.2).abs() < 1e-6);
    }
}
