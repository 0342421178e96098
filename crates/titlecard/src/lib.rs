//! Titlecard - title card images from Markdown front matter
//!
//! This crate ties the workspace together:
//! - [`FrontMatter`] reads the title, authors, category, tags and date of a
//!   Markdown document (YAML, TOML or JSON header)
//! - [`LayoutConfig`] describes where and how each element is drawn
//! - [`CardRenderer`] draws a card onto a template image
//!
//! The `titlecard` binary runs the renderer over a list of files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use titlecard::prelude::*;
//!
//! let family = Arc::new(FontFamily::from_dir("fonts/KintoSans")?);
//! let renderer = CardRenderer::new(family, LayoutConfig::default());
//!
//! let now = chrono::Local::now().fixed_offset();
//! let front_matter = FrontMatter::from_path("content/post/hello.md", now)?;
//! let template = image::open("template.png")?;
//! renderer.render_to_file(&front_matter, &template, "out/hello.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod card;
pub mod config;
pub mod frontmatter;

pub use titlecard_canvas as canvas;
pub use titlecard_core as core;
pub use titlecard_text as text;

pub use card::{CardError, CardRenderer, FaceSource};
pub use config::{CategoryConfig, ConfigError, InfoConfig, LayoutConfig, TagsConfig, TitleConfig};
pub use frontmatter::{FrontMatter, FrontMatterError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::card::{CardError, CardRenderer, FaceSource};
    pub use crate::config::LayoutConfig;
    pub use crate::frontmatter::FrontMatter;

    pub use titlecard_canvas::{BoxAlign, Canvas, StyleOption};
    pub use titlecard_core::{Padding, Point};
    pub use titlecard_text::{FontFace, FontFamily, FontStyle, SegmentationLevel};
}
