//! Titlecard Core
//!
//! This crate contains the shared building blocks for the titlecard crates:
//! fixed-point geometry, logging setup and hash collections.

pub mod alloc;
pub mod geometry;
pub mod logging;

pub use geometry::{Fixed, FixedPoint, Padding, Point, Rect};
