//! Titlecard Text - segmentation, font metrics and line packing
//!
//! This crate provides the text half of the title card engine:
//! - Script-aware segmentation into break units ([`PhraseSegmenter`])
//! - Font faces that measure and rasterize strings ([`FontFace`], [`CosmicFace`])
//! - Font family loading from a directory of font files ([`FontFamily`])
//! - Greedy line packing against a width budget ([`pack_lines`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use titlecard_core::Fixed;
//! use titlecard_text::{FontFace, FontFamily, FontStyle, PhraseSegmenter, SegmentationLevel, pack_text};
//!
//! let family = FontFamily::from_dir("fonts/KintoSans")?;
//! let face = family.new_face(FontStyle::Bold, 72.0)?;
//!
//! let lines = pack_text(
//!     &PhraseSegmenter::new(),
//!     SegmentationLevel::Default,
//!     "吾輩は猫である。名前はまだ無い。",
//!     Fixed::from_px(946),
//!     face.as_ref(),
//! );
//! # Ok::<(), titlecard_text::FaceError>(())
//! ```

pub mod cache;
pub mod error;
pub mod face;
pub mod font;
pub mod pack;
pub mod segment;
pub mod shaping;

pub use cache::MeasureCache;
pub use error::{FaceError, FaceResult};
pub use face::{FaceMetrics, FontFace};
pub use font::{FontDatabase, FontFamily, FontStyle};
pub use pack::{pack_lines, pack_text};
pub use segment::{PhraseSegmenter, SegmentationLevel, Segmenter, split_long_segment};
pub use shaping::CosmicFace;
