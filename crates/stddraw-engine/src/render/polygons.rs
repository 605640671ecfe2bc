//! Triangulations of filled polygons, kept across repaints.
//!
//! Every repaint replays the whole display list, and ear clipping is
//! quadratic or worse in the vertex count. Large outlines are therefore
//! triangulated once and looked up by their exact vertex bits afterwards.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::coords::Vec2;

use super::tessellate::{self, Triangle};

/// Smaller outlines are clipped again every frame.
const MIN_CACHED_VERTICES: usize = 16;

type Key = Vec<[u32; 2]>;

struct Entry {
    triangles: Vec<Triangle>,
    last_frame: u64,
}

/// Per-window cache. Entries not used by the latest frame are dropped when
/// it finishes, so the cache holds at most what is on screen.
#[derive(Default)]
pub(crate) struct PolygonCache {
    entries: HashMap<Key, Entry>,
    frame: u64,
    triangulated: usize,
}

impl PolygonCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn end_frame(&mut self) {
        let frame = self.frame;
        self.entries.retain(|_, e| e.last_frame == frame);
        log::trace!("polygon cache: {} entries, {} triangulations", self.len(), self.triangulated());
    }

    /// Triangles covering the polygon through `points`.
    pub fn fill(&mut self, points: &[Vec2]) -> Cow<'_, [Triangle]> {
        if points.len() < MIN_CACHED_VERTICES {
            return Cow::Owned(tessellate::fill_polygon(points));
        }

        let key: Key = points.iter().map(|p| [p.x.to_bits(), p.y.to_bits()]).collect();
        let frame = self.frame;
        let triangulated = &mut self.triangulated;
        let entry = self.entries.entry(key).or_insert_with(|| {
            *triangulated += 1;
            log::trace!("triangulating a {}-vertex polygon", points.len());
            Entry { triangles: tessellate::fill_polygon(points), last_frame: frame }
        });
        entry.last_frame = frame;
        Cow::Borrowed(&entry.triangles)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ear clippings run so far, cache hits excluded.
    #[inline]
    pub fn triangulated(&self) -> usize {
        self.triangulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(n: usize, offset: f32) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32 * std::f32::consts::TAU;
                let r = if i % 2 == 0 { 100.0 } else { 40.0 };
                Vec2::new(offset + r * t.cos(), offset + r * t.sin())
            })
            .collect()
    }

    #[test]
    fn large_polygon_is_triangulated_once_across_frames() {
        let mut cache = PolygonCache::new();
        let outline = star(400, 200.0);

        let mut counts = Vec::new();
        for _ in 0..3 {
            cache.begin_frame();
            counts.push(cache.fill(&outline).len());
            cache.end_frame();
        }

        assert_eq!(cache.triangulated(), 1);
        assert!(counts[0] > 0);
        assert!(counts.iter().all(|&c| c == counts[0]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entries_unused_by_a_frame_are_dropped() {
        let mut cache = PolygonCache::new();
        let a = star(64, 200.0);
        let b = star(64, 300.0);

        cache.begin_frame();
        cache.fill(&a);
        cache.fill(&b);
        cache.end_frame();
        assert_eq!(cache.len(), 2);

        cache.begin_frame();
        cache.fill(&b);
        cache.end_frame();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.triangulated(), 2);
    }

    #[test]
    fn small_polygons_bypass_the_cache() {
        let mut cache = PolygonCache::new();
        let square = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 4.0), Vec2::new(0.0, 4.0)];

        cache.begin_frame();
        assert_eq!(cache.fill(&square).len(), 2);
        cache.end_frame();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.triangulated(), 0);
    }
}
