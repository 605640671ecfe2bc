//! CPU tessellation of outlines and fills into triangle lists.
//!
//! All inputs and outputs are logical pixels, +Y down. Angles are degrees
//! measured from 3 o'clock, increasing clockwise on screen.

use crate::coords::{Rect, Vec2};
use crate::paint::LineCap;

pub(crate) type Triangle = [Vec2; 3];

/// Maximum distance between a true curve and its chord, in pixels.
const CURVE_TOLERANCE: f32 = 0.25;
const MIN_CURVE_SEGMENTS: usize = 8;
const MAX_CURVE_SEGMENTS: usize = 512;

// ── curves ────────────────────────────────────────────────────────────────

/// Number of chords approximating `sweep_deg` of a curve with radius `radius`.
pub(crate) fn curve_segments(radius: f32, sweep_deg: f32) -> usize {
    let sweep = sweep_deg.abs().to_radians();
    if !(radius.is_finite() && sweep.is_finite()) || sweep <= 0.0 {
        return 1;
    }
    let ratio = (1.0 - CURVE_TOLERANCE / radius.max(CURVE_TOLERANCE)).clamp(-1.0, 1.0);
    let step = (2.0 * ratio.acos()).max(1e-3);
    let full = (sweep / std::f32::consts::TAU).min(1.0);
    let min = ((MIN_CURVE_SEGMENTS as f32 * full).ceil() as usize).max(1);
    ((sweep / step).ceil() as usize).clamp(min, MAX_CURVE_SEGMENTS)
}

/// Points along the ellipse inscribed in `bounds`, from `start_deg` through
/// `start_deg + sweep_deg` inclusive.
pub(crate) fn ellipse_arc_points(bounds: Rect, start_deg: f32, sweep_deg: f32) -> Vec<Vec2> {
    let b = bounds.normalized();
    let c = b.center();
    let r = b.radii();
    let n = curve_segments(r.x.max(r.y), sweep_deg);

    (0..=n)
        .map(|i| {
            let t = (start_deg + sweep_deg * i as f32 / n as f32).to_radians();
            Vec2::new(c.x + r.x * t.cos(), c.y + r.y * t.sin())
        })
        .collect()
}

/// Closed outline of the ellipse inscribed in `bounds` (no repeated point).
pub(crate) fn ellipse_points(bounds: Rect) -> Vec<Vec2> {
    let mut points = ellipse_arc_points(bounds, 0.0, 360.0);
    points.pop();
    points
}

// ── fills ─────────────────────────────────────────────────────────────────

/// Fan triangulation; exact for convex outlines.
pub(crate) fn fill_convex(points: &[Vec2]) -> Vec<Triangle> {
    if points.len() < 3 {
        return Vec::new();
    }
    (1..points.len() - 1)
        .map(|i| [points[0], points[i], points[i + 1]])
        .collect()
}

pub(crate) fn fill_rect(bounds: Rect) -> Vec<Triangle> {
    let b = bounds.normalized();
    if b.is_empty() {
        return Vec::new();
    }
    fill_convex(&b.corners())
}

/// Triangulates a simple polygon by ear clipping.
///
/// Self-intersecting input has no ears left at some point; the remainder is
/// then fanned, which still covers the outline's hull region.
pub(crate) fn fill_polygon(points: &[Vec2]) -> Vec<Triangle> {
    let pts = dedup_closed(points);
    if pts.len() < 3 {
        return Vec::new();
    }

    let area = signed_area(&pts);
    if area == 0.0 || !area.is_finite() {
        return Vec::new();
    }
    let orientation = area.signum();

    let mut ring: Vec<usize> = (0..pts.len()).collect();
    let mut out = Vec::with_capacity(pts.len() - 2);

    while ring.len() > 3 {
        let m = ring.len();
        let mut clipped = false;

        for i in 0..m {
            let prev = ring[(i + m - 1) % m];
            let cur = ring[i];
            let next = ring[(i + 1) % m];
            let (a, b, c) = (pts[prev], pts[cur], pts[next]);

            let turn = (b - a).cross(c - b) * orientation;
            if turn.abs() <= f32::EPSILON {
                // Collinear vertex contributes no area.
                ring.remove(i);
                clipped = true;
                break;
            }
            if turn < 0.0 {
                continue;
            }

            let blocked = ring
                .iter()
                .filter(|&&j| j != prev && j != cur && j != next)
                .any(|&j| point_in_triangle(pts[j], a, b, c, orientation));
            if blocked {
                continue;
            }

            out.push([a, b, c]);
            ring.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            log::trace!("polygon has no ear left; fanning {} vertices", ring.len());
            let rest: Vec<Vec2> = ring.iter().map(|&j| pts[j]).collect();
            out.extend(fill_convex(&rest));
            return out;
        }
    }

    if ring.len() == 3 {
        out.push([pts[ring[0]], pts[ring[1]], pts[ring[2]]]);
    }
    out
}

fn dedup_closed(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].cross(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2, orientation: f32) -> bool {
    let d1 = (b - a).cross(p - a) * orientation;
    let d2 = (c - b).cross(p - b) * orientation;
    let d3 = (a - c).cross(p - c) * orientation;
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

// ── strokes ───────────────────────────────────────────────────────────────

/// Filled disc, used for round caps and joins.
pub(crate) fn disc(center: Vec2, radius: f32) -> Vec<Triangle> {
    if radius <= 0.0 {
        return Vec::new();
    }
    let r = Vec2::new(radius, radius);
    let bounds = Rect::around(center, r);
    fill_convex(&ellipse_points(bounds))
}

/// Strokes a polyline of width `width`, joining segments with round joins.
pub(crate) fn stroke_polyline(points: &[Vec2], closed: bool, width: f32, cap: LineCap) -> Vec<Triangle> {
    let half = width * 0.5;
    let mut out = Vec::new();
    if points.is_empty() || half <= 0.0 {
        return out;
    }

    let seg_count = if closed { points.len() } else { points.len() - 1 };
    let mut drew_segment = false;

    for i in 0..seg_count {
        let p0 = points[i];
        let p1 = points[(i + 1) % points.len()];
        let n = (p1 - p0).normalized().perp() * half;
        if n == Vec2::zero() {
            continue;
        }
        out.push([p0 + n, p1 + n, p1 - n]);
        out.push([p0 + n, p1 - n, p0 - n]);
        drew_segment = true;
    }

    // Joins at shared vertices; thin strokes leave no visible gap.
    if half > 1.0 && points.len() > 2 {
        let joins = if closed { 0..points.len() } else { 1..points.len() - 1 };
        for i in joins {
            out.extend(disc(points[i], half));
        }
    }

    if !closed && cap == LineCap::Round {
        let first = points[0];
        let last = points[points.len() - 1];
        out.extend(disc(first, half));
        if drew_segment || first != last {
            out.extend(disc(last, half));
        }
    }

    out
}

/// Outlines `bounds` with square corners; the stroke is centered on the edge.
pub(crate) fn stroke_rect(bounds: Rect, width: f32) -> Vec<Triangle> {
    let b = bounds.normalized();
    let half = width * 0.5;
    if half <= 0.0 {
        return Vec::new();
    }

    let outer = Rect::new(b.origin.x - half, b.origin.y - half, b.size.x + width, b.size.y + width);
    if b.size.x <= width || b.size.y <= width {
        return fill_rect(outer);
    }

    let min = outer.min();
    let max = outer.max();
    let top = Rect::new(min.x, min.y, outer.size.x, width);
    let bottom = Rect::new(min.x, max.y - width, outer.size.x, width);
    let left = Rect::new(min.x, min.y + width, width, outer.size.y - 2.0 * width);
    let right = Rect::new(max.x - width, min.y + width, width, outer.size.y - 2.0 * width);

    [top, bottom, left, right].into_iter().flat_map(fill_rect).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(tris: &[Triangle]) -> f32 {
        tris.iter()
            .map(|[a, b, c]| ((*b - *a).cross(*c - *a) * 0.5).abs())
            .sum()
    }

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    // ── curves ────────────────────────────────────────────────────────────

    #[test]
    fn larger_curves_get_more_segments() {
        assert!(curve_segments(200.0, 360.0) > curve_segments(5.0, 360.0));
        assert!(curve_segments(0.1, 360.0) >= MIN_CURVE_SEGMENTS);
        assert!(curve_segments(1e9, 360.0) <= MAX_CURVE_SEGMENTS);
    }

    #[test]
    fn zero_sweep_is_one_segment() {
        assert_eq!(curve_segments(50.0, 0.0), 1);
    }

    #[test]
    fn arc_starts_at_three_oclock_and_turns_clockwise() {
        let pts = ellipse_arc_points(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, 90.0);
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!(approx(first.x, 100.0, 1e-3) && approx(first.y, 50.0, 1e-3));
        // +90 degrees ends at 6 o'clock in y-down space.
        assert!(approx(last.x, 50.0, 1e-3) && approx(last.y, 100.0, 1e-3));
    }

    #[test]
    fn negative_sweep_turns_counter_clockwise() {
        let pts = ellipse_arc_points(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, -90.0);
        let last = pts[pts.len() - 1];
        assert!(approx(last.x, 50.0, 1e-3) && approx(last.y, 0.0, 1e-3));
    }

    #[test]
    fn ellipse_points_stay_on_the_ellipse() {
        let bounds = Rect::new(10.0, 20.0, 80.0, 40.0);
        for p in ellipse_points(bounds) {
            let dx = (p.x - 50.0) / 40.0;
            let dy = (p.y - 40.0) / 20.0;
            assert!(approx(dx * dx + dy * dy, 1.0, 1e-4));
        }
    }

    // ── fills ─────────────────────────────────────────────────────────────

    #[test]
    fn rect_fill_covers_its_area() {
        let tris = fill_rect(Rect::new(5.0, 5.0, 10.0, 4.0));
        assert_eq!(tris.len(), 2);
        assert!(approx(area(&tris), 40.0, 1e-4));
    }

    #[test]
    fn empty_rect_fills_nothing() {
        assert!(fill_rect(Rect::new(5.0, 5.0, 0.0, 4.0)).is_empty());
    }

    #[test]
    fn concave_polygon_area_is_preserved() {
        // L-shape, area 3.
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        assert!(approx(area(&fill_polygon(&pts)), 3.0, 1e-5));
    }

    #[test]
    fn polygon_winding_does_not_matter() {
        let mut pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let cw = area(&fill_polygon(&pts));
        pts.reverse();
        let ccw = area(&fill_polygon(&pts));
        assert!(approx(cw, 16.0, 1e-5));
        assert!(approx(ccw, 16.0, 1e-5));
    }

    #[test]
    fn collinear_vertices_are_skipped() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        assert!(approx(area(&fill_polygon(&pts)), 4.0, 1e-5));
    }

    #[test]
    fn degenerate_polygons_fill_nothing() {
        assert!(fill_polygon(&[]).is_empty());
        assert!(fill_polygon(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]).is_empty());
        let line = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        assert!(fill_polygon(&line).is_empty());
    }

    #[test]
    fn repeated_closing_point_is_ignored() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(0.0, 3.0),
            Vec2::new(0.0, 0.0),
        ];
        assert_eq!(fill_polygon(&pts).len(), 1);
    }

    // ── strokes ───────────────────────────────────────────────────────────

    #[test]
    fn straight_stroke_is_one_quad() {
        let tris = stroke_polyline(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)], false, 2.0, LineCap::Flat);
        assert_eq!(tris.len(), 2);
        assert!(approx(area(&tris), 20.0, 1e-4));
    }

    #[test]
    fn round_caps_add_discs() {
        let flat = stroke_polyline(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)], false, 4.0, LineCap::Flat);
        let round = stroke_polyline(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)], false, 4.0, LineCap::Round);
        assert!(round.len() > flat.len());
    }

    #[test]
    fn zero_length_flat_stroke_draws_nothing() {
        let p = Vec2::new(3.0, 3.0);
        assert!(stroke_polyline(&[p, p], false, 2.0, LineCap::Flat).is_empty());
        assert!(!stroke_polyline(&[p, p], false, 2.0, LineCap::Round).is_empty());
    }

    #[test]
    fn rect_stroke_is_a_frame() {
        // Outer 12x12 minus inner 8x8.
        let tris = stroke_rect(Rect::new(1.0, 1.0, 10.0, 10.0), 2.0);
        assert!(approx(area(&tris), 144.0 - 64.0, 1e-3));
    }

    #[test]
    fn thin_rect_stroke_degrades_to_fill() {
        let tris = stroke_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 2.0);
        assert!(approx(area(&tris), 9.0, 1e-4));
    }
}
