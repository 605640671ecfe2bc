use super::Vec2;

/// Axis-aligned bounding box in device pixels (top-left origin).
///
/// Ellipses, arcs and rectangles are all described by the box that encloses
/// them. A negative width or height is legal input; geometry helpers work on
/// the [`normalized`](Rect::normalized) box.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Box of the ellipse centred on `center` with semi-axes `radii`.
    #[inline]
    pub fn around(center: Vec2, radii: Vec2) -> Self {
        Self { origin: center - radii, size: radii * 2.0 }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.radii()
    }

    /// Semi-axes of the inscribed ellipse.
    #[inline]
    pub fn radii(self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 { (self.origin.x + self.size.x, -self.size.x) } else { (self.origin.x, self.size.x) };
        let (y, h) = if self.size.y < 0.0 { (self.origin.y + self.size.y, -self.size.y) } else { (self.origin.y, self.size.y) };
        Rect::new(x, y, w, h)
    }

    /// Corners clockwise on screen, starting top-left.
    pub fn corners(self) -> [Vec2; 4] {
        let r = self.normalized();
        let (min, max) = (r.min(), r.max());
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_inverts_center_and_radii() {
        let b = Rect::around(Vec2::new(50.0, 40.0), Vec2::new(25.0, 10.0));
        assert_eq!(b, Rect::new(25.0, 30.0, 50.0, 20.0));
        assert_eq!(b.center(), Vec2::new(50.0, 40.0));
        assert_eq!(b.radii(), Vec2::new(25.0, 10.0));
    }

    #[test]
    fn normalized_flips_negative_extents() {
        let b = Rect::new(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(b, Rect::new(6.0, 7.0, 4.0, 3.0));
        let ok = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(ok.normalized(), ok);
    }

    #[test]
    fn corners_of_a_flipped_box() {
        let c = Rect::new(4.0, 6.0, -3.0, -4.0).corners();
        assert_eq!(c, [Vec2::new(1.0, 2.0), Vec2::new(4.0, 2.0), Vec2::new(4.0, 6.0), Vec2::new(1.0, 6.0)]);
    }

    #[test]
    fn pixel_box_is_not_empty() {
        assert!(!Rect::new(3.0, 3.0, 1.0, 1.0).is_empty());
        assert!(Rect::new(3.0, 3.0, 0.0, 1.0).is_empty());
    }
}
