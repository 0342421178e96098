//! Pixel and sub-pixel geometry.
//!
//! Layout works in [`Fixed`] (26.6 fixed point) so that width comparisons are
//! exact and reproducible; painting snaps to whole pixels at the last moment.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A signed 26.6 fixed-point number: 26 integer bits, 6 fractional bits.
///
/// One unit is 1/64 of a pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(64);

    const SHIFT: i32 = 6;
    const HALF: i32 = 1 << (Self::SHIFT - 1);
    const MASK: i32 = (1 << Self::SHIFT) - 1;

    /// Create from raw 26.6 bits.
    pub const fn from_bits(bits: i32) -> Self {
        Fixed(bits)
    }

    /// Create from a whole number of pixels, saturating outside the 26.6 range.
    pub const fn from_px(px: i32) -> Self {
        Fixed(px.saturating_mul(1 << Self::SHIFT))
    }

    /// Create from a floating point pixel value, rounded to the nearest 1/64.
    ///
    /// Non-finite values map to zero.
    pub fn from_f32(px: f32) -> Self {
        if !px.is_finite() {
            return Fixed::ZERO;
        }
        Fixed((px * 64.0).round() as i32)
    }

    /// Raw 26.6 bits.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }

    /// Round to the nearest whole pixel, halves rounding up.
    pub const fn round(self) -> i32 {
        self.0.saturating_add(Self::HALF) >> Self::SHIFT
    }

    pub const fn floor(self) -> i32 {
        self.0 >> Self::SHIFT
    }

    pub const fn ceil(self) -> i32 {
        self.0.saturating_add(Self::MASK) >> Self::SHIFT
    }

    pub fn max(self, other: Fixed) -> Fixed {
        Fixed(self.0.max(other.0))
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: i32) -> Fixed {
        Fixed(self.0.saturating_mul(rhs))
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Fixed {
        Fixed(self.0.saturating_neg())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same notation as the 26.6 types in font toolkits: "12:32" is 12.5px.
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}:{:02}", sign, abs >> 6, abs & 0x3f)
    }
}

/// A point in 26.6 fixed-point coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    pub const fn from_point(p: Point) -> Self {
        Self {
            x: Fixed::from_px(p.x),
            y: Fixed::from_px(p.y),
        }
    }
}

/// A whole-pixel point. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Four-sided padding in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same padding on every side.
    pub const fn uniform(px: i32) -> Self {
        Self::new(px, px, px, px)
    }

    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// An axis-aligned rectangle in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Clip to `0..width` x `0..height`.
    pub fn clip_to(&self, width: u32, height: u32) -> Rect {
        let x0 = self.x.clamp(0, width as i32);
        let y0 = self.y.clamp(0, height as i32);
        let x1 = self.right().clamp(0, width as i32);
        let y1 = self.bottom().clamp(0, height as i32);
        Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}
