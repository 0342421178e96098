//! The metrics provider seam between layout and a concrete font backend.

use std::fmt;

use titlecard_core::{Fixed, FixedPoint};

/// Vertical metrics of a face at a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMetrics {
    /// Recommended distance between two consecutive baselines.
    pub height: Fixed,
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: Fixed,
    /// Distance from the baseline to the bottom of the lowest glyph (positive).
    pub descent: Fixed,
}

impl FaceMetrics {
    pub fn new(height: Fixed, ascent: Fixed, descent: Fixed) -> Self {
        Self {
            height,
            ascent,
            descent,
        }
    }
}

/// A font face loaded at one size.
///
/// Implementations must be total: every string, including the empty string
/// and strings with no renderable glyphs, can be measured and rasterized.
pub trait FontFace: Send + Sync + fmt::Debug {
    /// Vertical metrics of this face.
    fn metrics(&self) -> FaceMetrics;

    /// Advance width of `text` laid out on a single line.
    fn measure(&self, text: &str) -> Fixed;

    /// Rasterize `text` with its baseline starting at `origin`.
    ///
    /// `sink` receives `(x, y, coverage)` for every pixel with non-zero
    /// coverage. Coordinates may fall outside any target buffer; clipping is
    /// the caller's job. Returns the advance width, as [`FontFace::measure`].
    fn rasterize(&self, text: &str, origin: FixedPoint, sink: &mut dyn FnMut(i32, i32, u8))
    -> Fixed;
}
