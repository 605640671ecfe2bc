use std::fmt;

use stddraw_engine::paint::Color;

/// 8-bit RGBA color. Alpha defaults to opaque.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied engine color including alpha.
    #[inline]
    pub fn to_color(self) -> Color {
        Color::from_rgba_u8(self.r, self.g, self.b, self.a)
    }

    /// Engine color with alpha forced opaque.
    #[inline]
    pub fn to_opaque_color(self) -> Color {
        Color::from_rgba_u8(self.r, self.g, self.b, 255)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        NamedColor::Black.rgba()
    }
}

impl From<NamedColor> for Rgba {
    fn from(c: NamedColor) -> Self {
        c.rgba()
    }
}

/// The fixed palette of named colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Blue,
    Cyan,
    DarkGray,
    Gray,
    Green,
    LightGray,
    Magenta,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
    /// Shade of blue used in *Introduction to Programming in Java*.
    BookBlue,
    /// Shade of light blue used in *Introduction to Programming in Java*.
    BookLightBlue,
    /// Shade of red used in *Algorithms, 4th edition*.
    BookRed,
    /// Princeton orange (Pantone 1505).
    PrincetonOrange,
}

impl NamedColor {
    pub const ALL: [NamedColor; 17] = [
        NamedColor::Black,
        NamedColor::Blue,
        NamedColor::Cyan,
        NamedColor::DarkGray,
        NamedColor::Gray,
        NamedColor::Green,
        NamedColor::LightGray,
        NamedColor::Magenta,
        NamedColor::Orange,
        NamedColor::Pink,
        NamedColor::Red,
        NamedColor::White,
        NamedColor::Yellow,
        NamedColor::BookBlue,
        NamedColor::BookLightBlue,
        NamedColor::BookRed,
        NamedColor::PrincetonOrange,
    ];

    pub const fn rgba(self) -> Rgba {
        match self {
            NamedColor::Black => Rgba::new(0, 0, 0),
            NamedColor::Blue => Rgba::new(0, 0, 255),
            NamedColor::Cyan => Rgba::new(0, 255, 255),
            NamedColor::DarkGray => Rgba::new(102, 102, 102),
            NamedColor::Gray => Rgba::new(153, 153, 153),
            NamedColor::Green => Rgba::new(0, 255, 0),
            NamedColor::LightGray => Rgba::new(204, 204, 204),
            NamedColor::Magenta => Rgba::new(255, 0, 255),
            NamedColor::Orange => Rgba::new(255, 102, 0),
            NamedColor::Pink => Rgba::new(255, 192, 203),
            NamedColor::Red => Rgba::new(255, 0, 0),
            NamedColor::White => Rgba::new(255, 255, 255),
            NamedColor::Yellow => Rgba::new(255, 255, 0),
            NamedColor::BookBlue => Rgba::new(9, 90, 196),
            NamedColor::BookLightBlue => Rgba::new(103, 198, 243),
            NamedColor::BookRed => Rgba::new(150, 35, 31),
            NamedColor::PrincetonOrange => Rgba::new(245, 128, 37),
        }
    }

    /// Exact reverse lookup. `None` when no named color has this RGB.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Option<NamedColor> {
        Self::from_rgba(Rgba::new(r, g, b))
    }

    pub fn from_rgba(rgba: Rgba) -> Option<NamedColor> {
        Self::ALL.into_iter().find(|c| c.rgba() == rgba)
    }

    pub const fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "BLACK",
            NamedColor::Blue => "BLUE",
            NamedColor::Cyan => "CYAN",
            NamedColor::DarkGray => "DARK_GRAY",
            NamedColor::Gray => "GRAY",
            NamedColor::Green => "GREEN",
            NamedColor::LightGray => "LIGHT_GRAY",
            NamedColor::Magenta => "MAGENTA",
            NamedColor::Orange => "ORANGE",
            NamedColor::Pink => "PINK",
            NamedColor::Red => "RED",
            NamedColor::White => "WHITE",
            NamedColor::Yellow => "YELLOW",
            NamedColor::BookBlue => "BOOK_BLUE",
            NamedColor::BookLightBlue => "BOOK_LIGHT_BLUE",
            NamedColor::BookRed => "BOOK_RED",
            NamedColor::PrincetonOrange => "PRINCETON_ORANGE",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
