//! Titlecard Canvas - drawing text onto a pixel buffer
//!
//! A [`Canvas`] owns an RGBA pixel buffer and a drawing cursor. Text is drawn
//! either at a point, optionally wrapped against a maximum width, or as a row
//! of padded, background-filled "chips".
//!
//! Every draw call takes a list of [`StyleOption`]s. They are applied in
//! order to a copy of the canvas [`StyleState`], and the copy replaces the
//! current state only when every option succeeds, so a failing option leaves
//! both the pixels and the style untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use titlecard_canvas::{BoxAlign, Canvas, StyleOption};
//! use titlecard_core::{Padding, Point};
//! use titlecard_text::{FontFamily, FontStyle};
//!
//! let family = Arc::new(FontFamily::from_dir("fonts/KintoSans")?);
//! let template = image::open("template.png")?;
//! let mut canvas = Canvas::from_image(&template);
//!
//! canvas.draw_text_at_point(
//!     "吾輩は猫である。名前はまだ無い。",
//!     Point::new(123, 165),
//!     &[
//!         StyleOption::font_family(family.clone(), FontStyle::Bold, 72.0),
//!         StyleOption::fg_hex("#000000"),
//!         StyleOption::MaxWidth(946),
//!         StyleOption::LineSpacing(10),
//!     ],
//! )?;
//!
//! canvas.draw_box_texts(
//!     &["Rust", "Go"],
//!     Point::new(1025, 451),
//!     &[
//!         StyleOption::font_family(family, FontStyle::Medium, 22.0),
//!         StyleOption::fg_hex("#FFFFFF"),
//!         StyleOption::bg_hex("#60BCE0"),
//!         StyleOption::BoxPadding(Padding::new(6, 10, 6, 8)),
//!         StyleOption::BoxSpacing(6),
//!         StyleOption::BoxAlign(BoxAlign::Right),
//!     ],
//! )?;
//!
//! canvas.save_png("out/card.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canvas;
pub mod chip;
pub mod color;
pub mod error;
pub mod style;

pub use canvas::Canvas;
pub use chip::{Chip, layout_chips};
pub use color::{blend_over, parse_hex_color};
pub use error::{CanvasError, CanvasResult, StyleError};
pub use style::{BoxAlign, StyleOption, StyleState};
