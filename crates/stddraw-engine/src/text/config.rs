use std::path::PathBuf;

/// A font file registered under a family name and style.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSource {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    pub path: PathBuf,
}

impl FaceSource {
    pub fn new(family: impl Into<String>, bold: bool, italic: bool, path: impl Into<PathBuf>) -> Self {
        Self { family: family.into(), bold, italic, path: path.into() }
    }
}

/// Where the font system looks for font files.
///
/// `faces` are loaded under their declared family; unreadable files are
/// skipped. The first readable file in `fallback_paths` becomes the face used
/// when a requested family is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub faces: Vec<FaceSource>,
    pub fallback_paths: Vec<PathBuf>,
}

impl FontConfig {
    /// A configuration that loads nothing. Text measures to an empty box.
    pub fn empty() -> Self {
        Self { faces: Vec::new(), fallback_paths: Vec::new() }
    }

    pub fn with_face(mut self, face: FaceSource) -> Self {
        self.faces.push(face);
        self
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        let sans = [
            ("/usr/share/fonts/TTF/DejaVuSans", "SansSerif"),
            ("/usr/share/fonts/truetype/dejavu/DejaVuSans", "SansSerif"),
            ("/usr/share/fonts/dejavu/DejaVuSans", "SansSerif"),
        ];

        let mut faces = Vec::new();
        for (stem, family) in sans {
            faces.push(FaceSource::new(family, false, false, format!("{stem}.ttf")));
            faces.push(FaceSource::new(family, true, false, format!("{stem}-Bold.ttf")));
            faces.push(FaceSource::new(family, false, true, format!("{stem}-Oblique.ttf")));
            faces.push(FaceSource::new(family, true, true, format!("{stem}-BoldOblique.ttf")));
        }

        Self {
            faces,
            fallback_paths: [
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/noto/NotoSans-Regular.ttf",
                "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
                "C:\\Windows\\Fonts\\arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/Library/Fonts/Arial.ttf",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}
