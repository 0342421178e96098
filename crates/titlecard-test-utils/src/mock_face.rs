//! Mock implementation of FontFace for testing.

use std::collections::HashMap;

use parking_lot::Mutex;
use titlecard_core::{Fixed, FixedPoint};
use titlecard_text::{FaceMetrics, FontFace};

/// Records a face call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceCall {
    Measure { text: String },
    Rasterize { text: String, origin: FixedPoint },
}

/// A face where every character advances by a whole number of pixels.
///
/// Non-whitespace characters rasterize as solid blocks with full coverage,
/// spanning `advance` pixels horizontally and from `baseline - ascent` to
/// `baseline - 1` vertically. Whitespace advances but paints nothing.
#[derive(Debug)]
pub struct MockFace {
    advance: i32,
    overrides: HashMap<char, i32>,
    metrics: FaceMetrics,
    calls: Mutex<Vec<FaceCall>>,
}

impl MockFace {
    /// Create a face with `advance` pixels per character, height 10,
    /// ascent 8 and descent 2.
    pub fn new(advance: i32) -> Self {
        Self {
            advance,
            overrides: HashMap::new(),
            metrics: FaceMetrics::new(Fixed::from_px(10), Fixed::from_px(8), Fixed::from_px(2)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Give `ch` its own advance.
    pub fn with_advance(mut self, ch: char, advance: i32) -> Self {
        self.overrides.insert(ch, advance);
        self
    }

    /// Replace the vertical metrics, in whole pixels.
    pub fn with_metrics(mut self, height: i32, ascent: i32, descent: i32) -> Self {
        self.metrics = FaceMetrics::new(
            Fixed::from_px(height),
            Fixed::from_px(ascent),
            Fixed::from_px(descent),
        );
        self
    }

    fn advance_of(&self, ch: char) -> i32 {
        self.overrides.get(&ch).copied().unwrap_or(self.advance)
    }

    fn width_px(&self, text: &str) -> i32 {
        text.chars().map(|ch| self.advance_of(ch)).sum()
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<FaceCall> {
        self.calls.lock().clone()
    }

    pub fn count_measures(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, FaceCall::Measure { .. }))
            .count()
    }

    pub fn count_rasterizes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, FaceCall::Rasterize { .. }))
            .count()
    }

    /// Texts passed to `rasterize`, in call order.
    pub fn rasterized_texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                FaceCall::Rasterize { text, .. } => Some(text.clone()),
                FaceCall::Measure { .. } => None,
            })
            .collect()
    }

    /// Origins passed to `rasterize`, in call order.
    pub fn rasterized_origins(&self) -> Vec<FixedPoint> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                FaceCall::Rasterize { origin, .. } => Some(*origin),
                FaceCall::Measure { .. } => None,
            })
            .collect()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl FontFace for MockFace {
    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    fn measure(&self, text: &str) -> Fixed {
        self.calls.lock().push(FaceCall::Measure {
            text: text.to_string(),
        });
        Fixed::from_px(self.width_px(text))
    }

    fn rasterize(
        &self,
        text: &str,
        origin: FixedPoint,
        sink: &mut dyn FnMut(i32, i32, u8),
    ) -> Fixed {
        self.calls.lock().push(FaceCall::Rasterize {
            text: text.to_string(),
            origin,
        });

        let baseline = origin.y.round();
        let top = baseline - self.metrics.ascent.round();
        let mut x = origin.x.round();
        for ch in text.chars() {
            let advance = self.advance_of(ch);
            if !ch.is_whitespace() {
                for py in top..baseline {
                    for px in x..x + advance {
                        sink(px, py, 255);
                    }
                }
            }
            x += advance;
        }
        Fixed::from_px(self.width_px(text))
    }
}
