use stddraw_engine::text::FaceQuery;

pub const DEFAULT_FONT_NAME: &str = "SansSerif";
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Face style. Underline and strikeout are decorations over a regular face.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
    Underline,
    Strikeout,
}

impl FontStyle {
    #[inline]
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    #[inline]
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

/// Font: family name, style and size in device pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub name: String,
    pub style: FontStyle,
    pub size: u32,
}

impl Font {
    pub fn new(name: impl Into<String>, style: FontStyle, size: u32) -> Self {
        Self { name: name.into(), style, size }
    }

    /// Face lookup key for the engine's font system.
    pub fn face(&self) -> FaceQuery<'_> {
        FaceQuery::new(&self.name, self.style.is_bold(), self.style.is_italic())
    }

    #[inline]
    pub fn underline(&self) -> bool {
        self.style == FontStyle::Underline
    }

    #[inline]
    pub fn strikeout(&self) -> bool {
        self.style == FontStyle::Strikeout
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_NAME, FontStyle::Regular, DEFAULT_FONT_SIZE)
    }
}
