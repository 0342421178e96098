//! Errors that can occur while loading fonts and deriving faces.

use std::path::PathBuf;

use thiserror::Error;

use crate::font::FontStyle;

#[derive(Debug, Error)]
pub enum FaceError {
    /// The family has no face with the requested style, or the size is unusable.
    #[error("font face unavailable: {family} {style} at {size}px")]
    FontFaceUnavailable {
        family: String,
        style: FontStyle,
        size: f32,
    },

    /// A font directory did not contain any loadable face.
    #[error("no font faces found in {}", path.display())]
    NoFaces { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for font operations.
pub type FaceResult<T> = Result<T, FaceError>;
