//! Test utilities for titlecard.
//!
//! This crate provides deterministic stand-ins for the font and segmentation
//! seams so layout and drawing can be tested without font files.
//!
//! - [`MockFace`] - A [`FontFace`](titlecard_text::FontFace) with per-character
//!   advances and solid block glyphs
//! - [`RecordingSegmenter`] - A [`Segmenter`](titlecard_text::Segmenter) that
//!   splits on whitespace and records every call
//!
//! # Example
//!
//! ```rust
//! use titlecard_core::Fixed;
//! use titlecard_test_utils::MockFace;
//! use titlecard_text::FontFace;
//!
//! let face = MockFace::new(3).with_advance('W', 5);
//! assert_eq!(face.measure("aW"), Fixed::from_px(8));
//! assert_eq!(face.count_measures(), 1);
//! ```
//!
//! Both mocks take `&self` and record through a `parking_lot::Mutex`, so they
//! can be shared as `Arc<dyn FontFace>` or `Box<dyn Segmenter>`.

pub mod mock_face;
pub mod mock_segmenter;

pub use mock_face::*;
pub use mock_segmenter::*;
