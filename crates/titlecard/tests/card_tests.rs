//! Card rendering against mock faces.

use std::sync::Arc;

use chrono::{FixedOffset, TimeZone};
use image::{DynamicImage, Rgba, RgbaImage};
use titlecard::canvas::StyleError;
use titlecard::text::{FontFace, FontStyle};
use titlecard::{CardRenderer, FaceSource, FrontMatter, LayoutConfig};
use titlecard_test_utils::MockFace;

struct FixedFaces;

impl FaceSource for FixedFaces {
    fn face(&self, _style: FontStyle, size: f32) -> Result<Arc<dyn FontFace>, StyleError> {
        let advance = (size / 2.0) as i32;
        Ok(Arc::new(MockFace::new(advance).with_metrics(size as i32, size as i32 * 3 / 4, size as i32 / 4)))
    }
}

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn front_matter() -> FrontMatter {
    FrontMatter {
        title: "A title long enough to wrap onto a second line of the card".to_string(),
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
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(1200, 628, WHITE))
}

#[test]
fn test_tag_chips_end_at_anchor() {
    let renderer = CardRenderer::with_face_source(Arc::new(FixedFaces), LayoutConfig::default());
    let canvas = renderer.render(&front_matter(), &template()).unwrap();
    let img = canvas.image();

    // Tags start at (1025, 451) aligned right with the #60BCE0 fill.
    let bg = Rgba([0x60, 0xbc, 0xe0, 255]);
    assert_eq!(img.get_pixel(1024, 451), &bg);
    assert_eq!(img.get_pixel(1025, 451), &WHITE);
}

#[test]
fn test_title_is_painted_in_title_color() {
    let renderer = CardRenderer::with_face_source(Arc::new(FixedFaces), LayoutConfig::default());
    let canvas = renderer.render(&front_matter(), &template()).unwrap();

    // First glyph block of the title: baseline 165 + 72, ascent 54.
    assert_eq!(canvas.image().get_pixel(123, 165 + 72 - 1), &Rgba([0, 0, 0, 255]));
}

#[test]
fn test_render_to_file_writes_png() {
    let renderer = CardRenderer::with_face_source(Arc::new(FixedFaces), LayoutConfig::default());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.png");
    renderer
        .render_to_file(&front_matter(), &template(), &path)
        .unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 628));
}

#[test]
fn test_config_colors_are_used() {
    let config = LayoutConfig::from_yaml_str("tags:\n  bgHexColor: \"#FF0000\"\n").unwrap();
    let renderer = CardRenderer::with_face_source(Arc::new(FixedFaces), config);
    let canvas = renderer.render(&front_matter(), &template()).unwrap();
    assert_eq!(canvas.image().get_pixel(1024, 451), &Rgba([255, 0, 0, 255]));
}
