//! Card composition.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use thiserror::Error;
use titlecard_canvas::{Canvas, CanvasError, StyleError, StyleOption};
use titlecard_text::{FontFace, FontFamily, FontStyle};

use crate::config::LayoutConfig;
use crate::frontmatter::FrontMatter;

/// Supplies a face for a style and size.
pub trait FaceSource: Send + Sync {
    fn face(&self, style: FontStyle, size: f32) -> Result<Arc<dyn FontFace>, StyleError>;
}

impl FaceSource for FontFamily {
    fn face(&self, style: FontStyle, size: f32) -> Result<Arc<dyn FontFace>, StyleError> {
        match self.new_face(style, size) {
            Ok(face) => Ok(face),
            Err(err) => {
                tracing::debug!("{}", err);
                Err(StyleError::FontFaceUnavailable {
                    family: self.name().to_string(),
                    style,
                    size,
                })
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CardError {
    #[error("failed to draw {element}: {source}")]
    Draw {
        element: &'static str,
        source: CanvasError,
    },

    #[error("failed to format date with {format:?}")]
    DateFormat { format: String },

    #[error("failed to save card: {0}")]
    Save(CanvasError),
}

/// Draws cards with one font family and one layout.
pub struct CardRenderer {
    faces: Arc<dyn FaceSource>,
    config: LayoutConfig,
}

impl CardRenderer {
    pub fn new(family: Arc<FontFamily>, config: LayoutConfig) -> Self {
        Self::with_face_source(family, config)
    }

    pub fn with_face_source(faces: Arc<dyn FaceSource>, config: LayoutConfig) -> Self {
        Self { faces, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Draw the title, category, info line and tags onto a copy of `template`.
    pub fn render(
        &self,
        front_matter: &FrontMatter,
        template: &DynamicImage,
    ) -> Result<Canvas, CardError> {
        let config = &self.config;
        let mut canvas = Canvas::from_image(template);

        let title = &config.title;
        let options = [
            self.face_option(title.font_style, title.font_size)
                .map_err(draw_error("title"))?,
            StyleOption::fg_hex(title.fg_hex_color.as_str()),
            StyleOption::MaxWidth(title.max_width),
            StyleOption::LineSpacing(title.line_spacing),
            StyleOption::Segmentation(title.segmentation),
        ];
        canvas
            .draw_text_at_point(&front_matter.title, title.start, &options)
            .map_err(draw_error("title"))?;

        let category = &config.category;
        let options = [
            self.face_option(category.font_style, category.font_size)
                .map_err(draw_error("category"))?,
            StyleOption::fg_hex(category.fg_hex_color.as_str()),
            StyleOption::MaxWidth(0),
        ];
        canvas
            .draw_text_at_point(&front_matter.category, category.start, &options)
            .map_err(draw_error("category"))?;

        let info = &config.info;
        let mut line = format!("{}{}", front_matter.authors, info.separator);
        write!(line, "{}", front_matter.date.format(&info.date_format)).map_err(|_| {
            CardError::DateFormat {
                format: info.date_format.clone(),
            }
        })?;
        let options = [
            self.face_option(info.font_style, info.font_size)
                .map_err(draw_error("info"))?,
            StyleOption::fg_hex(info.fg_hex_color.as_str()),
            StyleOption::MaxWidth(0),
        ];
        canvas
            .draw_text_at_point(&line, info.start, &options)
            .map_err(draw_error("info"))?;

        let tags = &config.tags;
        let options = [
            self.face_option(tags.font_style, tags.font_size)
                .map_err(draw_error("tags"))?,
            StyleOption::fg_hex(tags.fg_hex_color.as_str()),
            StyleOption::bg_hex(tags.bg_hex_color.as_str()),
            StyleOption::BoxPadding(tags.box_padding),
            StyleOption::BoxSpacing(tags.box_spacing),
            StyleOption::BoxAlign(tags.box_align),
        ];
        canvas
            .draw_box_texts(&front_matter.tags, tags.start, &options)
            .map_err(draw_error("tags"))?;

        tracing::debug!("Rendered card for {:?}", front_matter.title);
        Ok(canvas)
    }

    /// Render and save as PNG at `path`.
    pub fn render_to_file(
        &self,
        front_matter: &FrontMatter,
        template: &DynamicImage,
        path: impl AsRef<Path>,
    ) -> Result<(), CardError> {
        let canvas = self.render(front_matter, template)?;
        canvas.save_png(path).map_err(CardError::Save)
    }

    fn face_option(&self, style: FontStyle, size: f32) -> Result<StyleOption, CanvasError> {
        let face = self
            .faces
            .face(style, size)
            .map_err(|source| CanvasError::OptionApplication {
                option: "FontFace",
                source,
            })?;
        Ok(StyleOption::FontFace(face))
    }
}

fn draw_error(element: &'static str) -> impl Fn(CanvasError) -> CardError {
    move |source| CardError::Draw { element, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use image::{Rgba, RgbaImage};
    use parking_lot::Mutex;
    use titlecard_test_utils::MockFace;

    /// Hands out mock faces and remembers the requested sizes.
    #[derive(Default)]
    struct MockFaces {
        requests: Mutex<Vec<(FontStyle, f32)>>,
        created: Mutex<Vec<Arc<MockFace>>>,
    }

    impl FaceSource for MockFaces {
        fn face(&self, style: FontStyle, size: f32) -> Result<Arc<dyn FontFace>, StyleError> {
            self.requests.lock().push((style, size));
            let face = Arc::new(MockFace::new(size as i32 / 4));
            self.created.lock().push(face.clone());
            Ok(face)
        }
    }

    fn front_matter() -> FrontMatter {
        FrontMatter {
            title: "Hello".to_string(),
            authors: "Ann".to_string(),
            category: "Blog".to_string(),
            tags: vec!["rust".to_string(), "cli".to_string()],
            date: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 3, 9, 0, 0, 0)
                .unwrap(),
        }
    }

    fn template() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(1200, 628, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn test_render_draws_every_element() {
        let source = Arc::new(MockFaces::default());
        let renderer = CardRenderer::with_face_source(source.clone(), LayoutConfig::default());
        renderer.render(&front_matter(), &template()).unwrap();

        let requests = source.requests.lock().clone();
        assert_eq!(
            requests,
            [
                (FontStyle::Bold, 72.0),
                (FontStyle::Regular, 42.0),
                (FontStyle::Regular, 38.0),
                (FontStyle::Medium, 22.0),
            ]
        );

        let created = source.created.lock();
        assert_eq!(created[0].rasterized_texts(), ["Hello"]);
        assert_eq!(created[1].rasterized_texts(), ["Blog"]);
        assert_eq!(created[2].rasterized_texts(), ["Ann・Mar 9"]);
        assert_eq!(created[3].rasterized_texts(), ["rust", "cli"]);
    }

    #[test]
    fn test_unavailable_face_names_element() {
        let family = Arc::new(FontFamily::new(
            titlecard_text::FontDatabase::empty(),
            "Nope Sans",
        ));
        let renderer = CardRenderer::new(family, LayoutConfig::default());
        let err = renderer.render(&front_matter(), &template()).unwrap_err();
        assert!(matches!(
            err,
            CardError::Draw {
                element: "title",
                source: CanvasError::OptionApplication {
                    source: StyleError::FontFaceUnavailable { .. },
                    ..
                }
            }
        ));
    }
}
