use std::fmt;

use crate::coords::Vec2;

use super::FontConfig;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Requested face: family name plus the style bits that select a font file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceQuery<'a> {
    pub family: &'a str,
    pub bold: bool,
    pub italic: bool,
}

impl<'a> FaceQuery<'a> {
    #[inline]
    pub const fn new(family: &'a str, bold: bool, italic: bool) -> Self {
        Self { family, bold, italic }
    }
}

struct LoadedFace {
    family: String,
    bold: bool,
    italic: bool,
    font: fontdue::Font,
}

/// Owns a collection of loaded fonts keyed by family and style.
///
/// Fonts are immutable after loading, so a finished system can be shared
/// between the thread that measures text and the thread that rasterizes it.
pub struct FontSystem {
    faces: Vec<LoadedFace>,
    fallback: Option<FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { faces: Vec::new(), fallback: None }
    }

    /// Loads every readable face named by `config`.
    ///
    /// Missing files are expected (the default lists paths for several
    /// platforms) and only logged at debug level.
    pub fn from_config(config: &FontConfig) -> Self {
        let mut system = Self::new();

        for face in &config.faces {
            let Ok(bytes) = std::fs::read(&face.path) else {
                log::debug!("font file not found: {}", face.path.display());
                continue;
            };
            if let Err(e) = system.load_font(&face.family, face.bold, face.italic, &bytes) {
                log::warn!("failed to load '{}': {e}", face.path.display());
            }
        }

        let fallback = config.fallback_paths.iter().find_map(|path| {
            let bytes = std::fs::read(path).ok()?;
            let family = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            system.load_font(&family, false, false, &bytes).ok()
        });

        match fallback {
            Some(id) => system.fallback = Some(id),
            None if system.faces.is_empty() => {
                log::warn!("no usable font found; text will not be drawn");
            }
            None => {}
        }

        system
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        bytes: &[u8],
    ) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.faces.len());
        self.faces.push(LoadedFace { family: family.to_lowercase(), bold, italic, font });
        Ok(id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Picks the best loaded face for `query`.
    ///
    /// Order: exact family + style, family regular, any face of the family,
    /// the fallback face, the first loaded face.
    pub fn resolve(&self, query: &FaceQuery<'_>) -> Option<FontId> {
        let family = query.family.to_lowercase();
        let in_family = |f: &&LoadedFace| f.family == family;

        let pick = |pred: &dyn Fn(&LoadedFace) -> bool| {
            self.faces.iter().position(|f| in_family(&f) && pred(f)).map(FontId)
        };

        pick(&|f: &LoadedFace| f.bold == query.bold && f.italic == query.italic)
            .or_else(|| pick(&|f: &LoadedFace| !f.bold && !f.italic))
            .or_else(|| pick(&|_: &LoadedFace| true))
            .or(self.fallback)
            .or_else(|| (!self.faces.is_empty()).then_some(FontId(0)))
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.faces.get(id.0).map(|f| &f.font)
    }

    /// Distance from the top of a laid-out line to its baseline.
    pub fn ascent(&self, query: &FaceQuery<'_>, size: f32) -> f32 {
        self.resolve(query)
            .and_then(|id| self.get(id))
            .and_then(|font| font.horizontal_line_metrics(size))
            .map_or(size * 0.8, |m| m.ascent)
    }

    /// Computes the bounding box of a laid-out single-line string.
    ///
    /// Returns `(width, height)` in device pixels. With no usable font the
    /// width is zero and the height is the nominal line height.
    #[must_use]
    pub fn measure_text(&self, text: &str, query: &FaceQuery<'_>, size: f32) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let Some(font) = self.resolve(query).and_then(|id| self.get(id)) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Use the pen position after each glyph rather than the bitmap right
        // edge so trailing spaces and side bearings count toward the width.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(size);
        Vec2::new(w, h)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FaceSource;

    #[test]
    fn empty_system_measures_nominal_line() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("hello", &FaceQuery::new("SansSerif", false, false), 20.0);
        assert_eq!(size, Vec2::new(0.0, 24.0));
    }

    #[test]
    fn empty_system_resolves_nothing() {
        let fonts = FontSystem::new();
        assert!(fonts.resolve(&FaceQuery::new("Serif", true, false)).is_none());
        assert!(fonts.is_empty());
    }

    #[test]
    fn invalid_bytes_are_rejected() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font("Broken", false, false, b"not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
        assert!(fonts.is_empty());
    }

    #[test]
    fn empty_config_loads_nothing() {
        let fonts = FontSystem::from_config(&FontConfig::empty());
        assert!(fonts.is_empty());
    }

    #[test]
    fn unreadable_face_files_are_skipped() {
        let config = FontConfig::empty()
            .with_face(FaceSource::new("Serif", false, false, "/nonexistent/stddraw/Serif.ttf"))
            .with_face(FaceSource::new("Serif", true, false, "/nonexistent/stddraw/Serif-Bold.ttf"));
        assert_eq!(config.faces.len(), 2);

        let fonts = FontSystem::from_config(&config);
        assert!(fonts.is_empty());
        assert!(fonts.resolve(&FaceQuery::new("Serif", true, false)).is_none());
    }
}
