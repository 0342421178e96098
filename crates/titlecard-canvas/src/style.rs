//! Style state and the options that change it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use image::Rgba;
use serde::{Deserialize, Serialize};
use titlecard_core::Padding;
use titlecard_text::{FontFace, FontFamily, FontStyle, SegmentationLevel};

use crate::color::parse_hex_color;
use crate::error::{CanvasError, StyleError};

/// Horizontal anchoring of a row of box texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxAlign {
    /// The first chip starts at the anchor.
    #[default]
    #[serde(alias = "left")]
    Left,
    /// The last chip ends at the anchor.
    #[serde(alias = "right")]
    Right,
}

impl FromStr for BoxAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(BoxAlign::Left),
            "right" => Ok(BoxAlign::Right),
            _ => Err(format!("unknown box alignment: {:?}", s)),
        }
    }
}

impl fmt::Display for BoxAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxAlign::Left => f.write_str("left"),
            BoxAlign::Right => f.write_str("right"),
        }
    }
}

/// Everything a draw call reads besides its text and start point.
///
/// Values persist across draw calls until an option overrides them.
#[derive(Debug, Clone)]
pub struct StyleState {
    pub face: Option<Arc<dyn FontFace>>,
    pub fg: Rgba<u8>,
    /// Chip fill; chips are not filled while this is `None`.
    pub bg: Option<Rgba<u8>>,
    /// Wrap width in pixels; 0 disables wrapping.
    pub max_width: u32,
    /// Extra pixels between wrapped lines.
    pub line_spacing: i32,
    pub box_padding: Padding,
    /// Pixels between neighbouring chips.
    pub box_spacing: i32,
    pub box_align: BoxAlign,
    pub segmentation: SegmentationLevel,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            face: None,
            fg: Rgba([0, 0, 0, 255]),
            bg: None,
            max_width: 0,
            line_spacing: 0,
            box_padding: Padding::default(),
            box_spacing: 0,
            box_align: BoxAlign::Left,
            segmentation: SegmentationLevel::Default,
        }
    }
}

impl StyleState {
    /// Apply `options` in order to a copy of this state.
    ///
    /// Returns the first failure, naming the option that caused it.
    pub fn with_options(&self, options: &[StyleOption]) -> Result<StyleState, CanvasError> {
        let mut scratch = self.clone();
        for option in options {
            option
                .apply(&mut scratch)
                .map_err(|source| CanvasError::OptionApplication {
                    option: option.name(),
                    source,
                })?;
        }
        Ok(scratch)
    }
}

/// One change to a [`StyleState`].
#[derive(Debug, Clone)]
pub enum StyleOption {
    FontFace(Arc<dyn FontFace>),
    /// Derive the face from a family; fails if the family lacks the style.
    FontFamily {
        family: Arc<FontFamily>,
        style: FontStyle,
        size: f32,
    },
    FgColor(Rgba<u8>),
    FgHex(String),
    BgColor(Rgba<u8>),
    BgHex(String),
    MaxWidth(u32),
    LineSpacing(i32),
    BoxPadding(Padding),
    BoxSpacing(i32),
    BoxAlign(BoxAlign),
    Segmentation(SegmentationLevel),
}

impl StyleOption {
    pub fn font_face(face: Arc<dyn FontFace>) -> Self {
        StyleOption::FontFace(face)
    }

    pub fn font_family(family: Arc<FontFamily>, style: FontStyle, size: f32) -> Self {
        StyleOption::FontFamily {
            family,
            style,
            size,
        }
    }

    pub fn fg_hex(hex: impl Into<String>) -> Self {
        StyleOption::FgHex(hex.into())
    }

    pub fn bg_hex(hex: impl Into<String>) -> Self {
        StyleOption::BgHex(hex.into())
    }

    /// Variant name, used in error reports.
    pub fn name(&self) -> &'static str {
        match self {
            StyleOption::FontFace(_) => "FontFace",
            StyleOption::FontFamily { .. } => "FontFamily",
            StyleOption::FgColor(_) => "FgColor",
            StyleOption::FgHex(_) => "FgHex",
            StyleOption::BgColor(_) => "BgColor",
            StyleOption::BgHex(_) => "BgHex",
            StyleOption::MaxWidth(_) => "MaxWidth",
            StyleOption::LineSpacing(_) => "LineSpacing",
            StyleOption::BoxPadding(_) => "BoxPadding",
            StyleOption::BoxSpacing(_) => "BoxSpacing",
            StyleOption::BoxAlign(_) => "BoxAlign",
            StyleOption::Segmentation(_) => "Segmentation",
        }
    }

    /// Apply this option to `state`, touching only the field it names.
    ///
    /// On error `state` is unchanged.
    pub fn apply(&self, state: &mut StyleState) -> Result<(), StyleError> {
        match self {
            StyleOption::FontFace(face) => state.face = Some(face.clone()),
            StyleOption::FontFamily {
                family,
                style,
                size,
            } => {
                let face: Arc<dyn FontFace> = family.new_face(*style, *size).map_err(|err| {
                    tracing::debug!("{}", err);
                    StyleError::FontFaceUnavailable {
                        family: family.name().to_string(),
                        style: *style,
                        size: *size,
                    }
                })?;
                state.face = Some(face);
            }
            StyleOption::FgColor(color) => state.fg = *color,
            StyleOption::FgHex(hex) => state.fg = parse_hex_color(hex)?,
            StyleOption::BgColor(color) => state.bg = Some(*color),
            StyleOption::BgHex(hex) => state.bg = Some(parse_hex_color(hex)?),
            StyleOption::MaxWidth(px) => state.max_width = *px,
            StyleOption::LineSpacing(px) => state.line_spacing = *px,
            StyleOption::BoxPadding(padding) => state.box_padding = *padding,
            StyleOption::BoxSpacing(px) => state.box_spacing = *px,
            StyleOption::BoxAlign(align) => state.box_align = *align,
            StyleOption::Segmentation(level) => state.segmentation = *level,
        }
        Ok(())
    }
}
