//! Text shaping and rasterization with cosmic-text.
//!
//! [`CosmicFace`] is the production [`FontFace`]: strings are shaped on a
//! single unwrapped line with `Shaping::Advanced` (font fallback included) and
//! glyphs are rasterized through the family's shared `SwashCache`.

use std::fmt;
use std::sync::Arc;

use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Wrap,
};
use parking_lot::Mutex;

use crate::cache::MeasureCache;
use crate::face::{FaceMetrics, FontFace};
use crate::font::FontStyle;
use titlecard_core::{Fixed, FixedPoint};

/// A face of a [`FontFamily`](crate::FontFamily) at one size.
pub struct CosmicFace {
    family: String,
    style: FontStyle,
    size: f32,
    metrics: FaceMetrics,
    font_system: Arc<Mutex<FontSystem>>,
    swash_cache: Arc<Mutex<SwashCache>>,
    cache: Mutex<MeasureCache>,
}

impl CosmicFace {
    pub(crate) fn new(
        family: String,
        style: FontStyle,
        size: f32,
        metrics: FaceMetrics,
        font_system: Arc<Mutex<FontSystem>>,
        swash_cache: Arc<Mutex<SwashCache>>,
    ) -> Self {
        Self {
            family,
            style,
            size,
            metrics,
            font_system,
            swash_cache,
            cache: Mutex::new(MeasureCache::new()),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Measurement cache statistics.
    pub fn cache_stats(&self) -> String {
        self.cache.lock().stats_string()
    }

    fn attrs(&self) -> Attrs<'_> {
        Attrs::new()
            .family(Family::Name(&self.family))
            .weight(self.style.weight())
            .style(cosmic_text::Style::Normal)
    }

    /// Shape `text` on one line.
    fn shape(&self, font_system: &mut FontSystem, text: &str) -> Buffer {
        let line_height = self.metrics.height.to_f32().max(self.size);
        let mut buffer = Buffer::new(font_system, Metrics::new(self.size, line_height));
        buffer.set_wrap(font_system, Wrap::None);
        buffer.set_text(font_system, text, self.attrs(), Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);
        buffer
    }
}

/// Width of the widest laid out line in `buffer`.
fn buffer_width(buffer: &Buffer) -> f32 {
    buffer
        .layout_runs()
        .map(|run| run.line_w)
        .fold(0.0_f32, f32::max)
}

fn coverage_at(content: SwashContent, data: &[u8], idx: usize) -> u8 {
    match content {
        SwashContent::Mask => data.get(idx).copied().unwrap_or(0),
        SwashContent::Color => data.get(idx * 4 + 3).copied().unwrap_or(0),
        SwashContent::SubpixelMask => data
            .get(idx * 4..idx * 4 + 3)
            .and_then(|px| px.iter().copied().max())
            .unwrap_or(0),
    }
}

impl FontFace for CosmicFace {
    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    fn measure(&self, text: &str) -> Fixed {
        if text.is_empty() {
            return Fixed::ZERO;
        }
        if let Some(width) = self.cache.lock().get(text) {
            return width;
        }

        let width = {
            let mut font_system = self.font_system.lock();
            let buffer = self.shape(&mut font_system, text);
            Fixed::from_f32(buffer_width(&buffer))
        };
        self.cache.lock().insert(text, width);
        width
    }

    fn rasterize(
        &self,
        text: &str,
        origin: FixedPoint,
        sink: &mut dyn FnMut(i32, i32, u8),
    ) -> Fixed {
        if text.is_empty() {
            return Fixed::ZERO;
        }

        let mut font_system = self.font_system.lock();
        let mut swash_cache = self.swash_cache.lock();
        let buffer = self.shape(&mut font_system, text);

        let (ox, oy) = (origin.x.to_f32(), origin.y.to_f32());
        let mut first_line_y = None;
        for run in buffer.layout_runs() {
            // Embedded newlines produce extra runs below the first baseline.
            let line_offset = run.line_y - *first_line_y.get_or_insert(run.line_y);
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((ox, oy + line_offset), 1.0);
                let Some(image) = swash_cache.get_image(&mut font_system, physical.cache_key)
                else {
                    continue;
                };

                let left = physical.x + image.placement.left;
                let top = physical.y - image.placement.top;
                let width = image.placement.width as i32;
                let height = image.placement.height as i32;
                for row in 0..height {
                    for col in 0..width {
                        let coverage =
                            coverage_at(image.content, &image.data, (row * width + col) as usize);
                        if coverage > 0 {
                            sink(left + col, top + row, coverage);
                        }
                    }
                }
            }
        }

        let width = Fixed::from_f32(buffer_width(&buffer));
        drop(swash_cache);
        drop(font_system);
        self.cache.lock().insert(text, width);
        width
    }
}

impl fmt::Debug for CosmicFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmicFace")
            .field("family", &self.family)
            .field("style", &self.style)
            .field("size", &self.size)
            .field("metrics", &self.metrics)
            .finish()
    }
}
