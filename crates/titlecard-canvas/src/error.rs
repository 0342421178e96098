//! Errors that can occur while styling and drawing.

use thiserror::Error;
use titlecard_text::FontStyle;

/// A style option that could not be applied.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    #[error("font face unavailable: {family} {style} at {size}px")]
    FontFaceUnavailable {
        family: String,
        style: FontStyle,
        size: f32,
    },
}

#[derive(Debug, Error)]
pub enum CanvasError {
    /// An option failed; nothing was drawn and the style was not changed.
    #[error("failed to apply style option {option}: {source}")]
    OptionApplication {
        option: &'static str,
        source: StyleError,
    },

    /// A draw call was made before any font face was set.
    #[error("no font face set")]
    MissingFontFace,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
