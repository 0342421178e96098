use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use cosmic_text::{SwashCache, fontdb};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{FaceError, FaceResult};
use crate::face::FaceMetrics;
use crate::shaping::CosmicFace;
use titlecard_core::Fixed;

/// The set of font faces a [`FontFamily`] is built from.
pub struct FontDatabase {
    inner: fontdb::Database,
}

impl FontDatabase {
    /// A database holding every font installed on the system.
    pub fn new() -> Self {
        let mut db = Self::empty();
        db.inner.load_system_fonts();
        db
    }

    pub fn empty() -> Self {
        Self {
            inner: fontdb::Database::new(),
        }
    }

    /// Add the faces in an in-memory font file. Data that is not a font is ignored.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.inner
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));
    }

    /// Add the faces in a .ttf, .otf or .ttc file.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.inner.load_font_file(path)
    }

    /// Add every font file under `path`, recursively.
    pub fn load_fonts_dir(&mut self, path: impl AsRef<Path>) {
        self.inner.load_fonts_dir(path);
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.inner
            .faces()
            .any(|face| face.families.iter().any(|(name, _)| name == family))
    }

    /// Every family name, sorted.
    pub fn list_families(&self) -> Vec<String> {
        self.families_where(|_| true)
    }

    /// Families that have an upright face of `style`, sorted.
    pub fn families_with_style(&self, style: FontStyle) -> Vec<String> {
        self.families_where(|face| {
            face.weight == style.weight() && face.style == fontdb::Style::Normal
        })
    }

    fn families_where(&self, pred: impl Fn(&fontdb::FaceInfo) -> bool) -> Vec<String> {
        let families: BTreeSet<&str> = self
            .inner
            .faces()
            .filter(|face| pred(face))
            .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
            .collect();
        families.into_iter().map(str::to_string).collect()
    }

    /// Family name of the first loaded face.
    pub fn first_family(&self) -> Option<String> {
        self.inner
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(family, _)| family.clone())
    }

    /// Number of loaded faces.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// The upright styles a font family directory is expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Thin,
    ExtraLight,
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontStyle {
    pub const ALL: [FontStyle; 9] = [
        FontStyle::Thin,
        FontStyle::ExtraLight,
        FontStyle::Light,
        FontStyle::Regular,
        FontStyle::Medium,
        FontStyle::SemiBold,
        FontStyle::Bold,
        FontStyle::ExtraBold,
        FontStyle::Black,
    ];

    pub(crate) fn weight(self) -> fontdb::Weight {
        match self {
            FontStyle::Thin => fontdb::Weight::THIN,
            FontStyle::ExtraLight => fontdb::Weight::EXTRA_LIGHT,
            FontStyle::Light => fontdb::Weight::LIGHT,
            FontStyle::Regular => fontdb::Weight::NORMAL,
            FontStyle::Medium => fontdb::Weight::MEDIUM,
            FontStyle::SemiBold => fontdb::Weight::SEMIBOLD,
            FontStyle::Bold => fontdb::Weight::BOLD,
            FontStyle::ExtraBold => fontdb::Weight::EXTRA_BOLD,
            FontStyle::Black => fontdb::Weight::BLACK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Thin => "Thin",
            FontStyle::ExtraLight => "ExtraLight",
            FontStyle::Light => "Light",
            FontStyle::Regular => "Regular",
            FontStyle::Medium => "Medium",
            FontStyle::SemiBold => "SemiBold",
            FontStyle::Bold => "Bold",
            FontStyle::ExtraBold => "ExtraBold",
            FontStyle::Black => "Black",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FontStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown font style: {:?}", s))
    }
}

/// One font family, shared by every face derived from it.
///
/// Faces share the family's `cosmic_text::FontSystem` (fallback fonts
/// included) and glyph cache.
pub struct FontFamily {
    name: String,
    font_system: Arc<Mutex<cosmic_text::FontSystem>>,
    swash_cache: Arc<Mutex<SwashCache>>,
}

impl FontFamily {
    /// Create a family named `name` backed by `db`.
    pub fn new(db: FontDatabase, name: impl Into<String>) -> Self {
        let font_system = cosmic_text::FontSystem::new_with_locale_and_db(
            sys_locale::get_locale().unwrap_or_else(|| String::from("en-US")),
            db.inner,
        );
        Self {
            name: name.into(),
            font_system: Arc::new(Mutex::new(font_system)),
            swash_cache: Arc::new(Mutex::new(SwashCache::new())),
        }
    }

    /// Load every font file in `path` and name the family after the first face.
    pub fn from_dir(path: impl AsRef<Path>) -> FaceResult<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(FaceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("font directory not found: {}", path.display()),
            )));
        }

        let mut db = FontDatabase::empty();
        db.load_fonts_dir(path);
        let Some(name) = db.first_family() else {
            return Err(FaceError::NoFaces {
                path: path.to_path_buf(),
            });
        };

        tracing::debug!(
            "Loaded font family '{}' ({} faces) from {}",
            name,
            db.len(),
            path.display()
        );
        Ok(Self::new(db, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Styles this family can provide.
    pub fn styles(&self) -> Vec<FontStyle> {
        let font_system = self.font_system.lock();
        FontStyle::ALL
            .into_iter()
            .filter(|style| self.find_face(&font_system, *style).is_some())
            .collect()
    }

    /// Derive a face of `style` at `size` pixels.
    pub fn new_face(&self, style: FontStyle, size: f32) -> FaceResult<Arc<CosmicFace>> {
        let unavailable = || FaceError::FontFaceUnavailable {
            family: self.name.clone(),
            style,
            size,
        };
        if !(size.is_finite() && size > 0.0) {
            return Err(unavailable());
        }

        let mut font_system = self.font_system.lock();
        let id = self.find_face(&font_system, style).ok_or_else(unavailable)?;
        let font = font_system.get_font(id).ok_or_else(unavailable)?;

        let swash_metrics = font.as_swash().metrics(&[]).scale(size);
        let ascent = swash_metrics.ascent.abs();
        let descent = swash_metrics.descent.abs();
        let leading = swash_metrics.leading.max(0.0);
        let metrics = FaceMetrics::new(
            Fixed::from_f32(ascent + descent + leading),
            Fixed::from_f32(ascent),
            Fixed::from_f32(descent),
        );
        drop(font_system);

        tracing::debug!(
            "Created face {} {} at {}px (height {}, ascent {}, descent {})",
            self.name,
            style,
            size,
            metrics.height,
            metrics.ascent,
            metrics.descent
        );

        Ok(Arc::new(CosmicFace::new(
            self.name.clone(),
            style,
            size,
            metrics,
            self.font_system.clone(),
            self.swash_cache.clone(),
        )))
    }

    fn find_face(
        &self,
        font_system: &cosmic_text::FontSystem,
        style: FontStyle,
    ) -> Option<fontdb::ID> {
        font_system
            .db()
            .faces()
            .find(|face| {
                face.weight == style.weight()
                    && face.style == fontdb::Style::Normal
                    && face.families.iter().any(|(f, _)| *f == self.name)
            })
            .map(|face| face.id)
    }
}

impl fmt::Debug for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFamily").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_parse() {
        assert_eq!("bold".parse::<FontStyle>(), Ok(FontStyle::Bold));
        assert_eq!(" SemiBold ".parse::<FontStyle>(), Ok(FontStyle::SemiBold));
        assert!("Oblique".parse::<FontStyle>().is_err());
    }

    #[test]
    fn test_font_style_weights_are_ordered() {
        let weights: Vec<u16> = FontStyle::ALL.iter().map(|s| s.weight().0).collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_dir_missing_directory() {
        let result = FontFamily::from_dir("/definitely/not/a/font/dir");
        assert!(matches!(result, Err(FaceError::Io(_))));
    }

    #[test]
    fn test_from_dir_without_fonts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), "not a font").unwrap();
        let result = FontFamily::from_dir(dir.path());
        assert!(matches!(result, Err(FaceError::NoFaces { .. })));
    }

    #[test]
    fn test_empty_database() {
        let db = FontDatabase::empty();
        assert!(db.is_empty());
        assert!(db.first_family().is_none());
        assert!(!db.has_family("sans-serif"));
        assert!(db.list_families().is_empty());
        assert!(db.families_with_style(FontStyle::Regular).is_empty());
    }

    #[test]
    fn test_non_font_data_is_ignored() {
        let mut db = FontDatabase::empty();
        db.load_font_data(b"definitely not a font".to_vec());
        assert!(db.is_empty());
        assert!(db.load_font_file("/definitely/not/a/font.ttf").is_err());
    }

    #[test]
    fn test_unknown_family_has_no_faces() {
        let family = FontFamily::new(FontDatabase::empty(), "Nope Sans");
        assert!(family.styles().is_empty());
        let err = family.new_face(FontStyle::Regular, 24.0).unwrap_err();
        assert!(matches!(err, FaceError::FontFaceUnavailable { style: FontStyle::Regular, .. }));
    }

    #[test]
    fn test_invalid_size_is_unavailable() {
        let family = FontFamily::new(FontDatabase::empty(), "Nope Sans");
        assert!(family.new_face(FontStyle::Bold, 0.0).is_err());
        assert!(family.new_face(FontStyle::Bold, f32::NAN).is_err());
    }
}
