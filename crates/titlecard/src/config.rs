//! Card layout configuration.
//!
//! Every field has a default, so an empty document (or no file at all)
//! describes the stock card layout.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use titlecard_canvas::{BoxAlign, StyleError, parse_hex_color};
use titlecard_core::{Padding, Point};
use titlecard_text::{FontStyle, SegmentationLevel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid layout config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid {field}: {source}")]
    InvalidColor {
        field: &'static str,
        source: StyleError,
    },

    #[error("invalid {field}: {value:?} is not a valid date format")]
    InvalidDateFormat { field: &'static str, value: String },

    #[error("invalid {field}: must be positive, got {value}")]
    InvalidFontSize { field: &'static str, value: f32 },
}

/// Layout of a whole card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutConfig {
    /// Background image; the command line flag wins over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Directory with the font family's files; the command line flag wins over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_dir: Option<PathBuf>,
    pub title: TitleConfig,
    pub category: CategoryConfig,
    pub info: InfoConfig,
    pub tags: TagsConfig,
}

/// The wrapped title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TitleConfig {
    pub start: Point,
    pub fg_hex_color: String,
    pub font_size: f32,
    pub font_style: FontStyle,
    pub max_width: u32,
    pub line_spacing: i32,
    pub segmentation: SegmentationLevel,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            start: Point::new(123, 165),
            fg_hex_color: "#000000".to_string(),
            font_size: 72.0,
            font_style: FontStyle::Bold,
            max_width: 946,
            line_spacing: 10,
            segmentation: SegmentationLevel::Default,
        }
    }
}

/// The category line above the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryConfig {
    pub start: Point,
    pub fg_hex_color: String,
    pub font_size: f32,
    pub font_style: FontStyle,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            start: Point::new(126, 119),
            fg_hex_color: "#8D8D8D".to_string(),
            font_size: 42.0,
            font_style: FontStyle::Regular,
        }
    }
}

/// The `authors<separator>date` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InfoConfig {
    pub start: Point,
    pub fg_hex_color: String,
    pub font_size: f32,
    pub font_style: FontStyle,
    pub separator: String,
    /// `strftime`-style format for the date.
    pub date_format: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            start: Point::new(227, 441),
            fg_hex_color: "#8D8D8D".to_string(),
            font_size: 38.0,
            font_style: FontStyle::Regular,
            separator: "・".to_string(),
            date_format: "%b %-d".to_string(),
        }
    }
}

/// The row of tag chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TagsConfig {
    pub start: Point,
    pub fg_hex_color: String,
    pub bg_hex_color: String,
    pub font_size: f32,
    pub font_style: FontStyle,
    pub box_align: BoxAlign,
    pub box_spacing: i32,
    pub box_padding: Padding,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            start: Point::new(1025, 451),
            fg_hex_color: "#FFFFFF".to_string(),
            bg_hex_color: "#60BCE0".to_string(),
            font_size: 22.0,
            font_style: FontStyle::Medium,
            box_align: BoxAlign::Right,
            box_spacing: 6,
            box_padding: Padding::new(6, 10, 6, 8),
        }
    }
}

impl LayoutConfig {
    /// Load and validate a YAML layout file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!("Loaded layout config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a YAML layout document. An empty document yields
    /// the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the fields serde cannot: colors, font sizes and the date format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let colors = [
            ("title.fgHexColor", &self.title.fg_hex_color),
            ("category.fgHexColor", &self.category.fg_hex_color),
            ("info.fgHexColor", &self.info.fg_hex_color),
            ("tags.fgHexColor", &self.tags.fg_hex_color),
            ("tags.bgHexColor", &self.tags.bg_hex_color),
        ];
        for (field, hex) in colors {
            parse_hex_color(hex).map_err(|source| ConfigError::InvalidColor { field, source })?;
        }

        let sizes = [
            ("title.fontSize", self.title.font_size),
            ("category.fontSize", self.category.font_size),
            ("info.fontSize", self.info.font_size),
            ("tags.fontSize", self.tags.font_size),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidFontSize { field, value });
            }
        }

        if StrftimeItems::new(&self.info.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat {
                field: "info.dateFormat",
                value: self.info.date_format.clone(),
            });
        }
        Ok(())
    }
}
