//! The drawing surface.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use titlecard_core::{Fixed, FixedPoint, Point, Rect};
use titlecard_text::{FontFace, PhraseSegmenter, Segmenter, pack_text};

use crate::chip::layout_chips;
use crate::color::blend_over;
use crate::error::{CanvasError, CanvasResult};
use crate::style::{StyleOption, StyleState};

/// An RGBA pixel buffer with a text cursor and a persistent style.
pub struct Canvas {
    dst: RgbaImage,
    /// Baseline-relative insertion point.
    dot: FixedPoint,
    style: StyleState,
    segmenter: Box<dyn Segmenter>,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_rgba(RgbaImage::new(width, height))
    }

    /// Create a canvas holding a copy of `template`; its size is the canvas size.
    pub fn from_image(template: &DynamicImage) -> Self {
        Self::from_rgba(template.to_rgba8())
    }

    pub fn from_rgba(dst: RgbaImage) -> Self {
        Self {
            dst,
            dot: FixedPoint::default(),
            style: StyleState::default(),
            segmenter: Box::new(PhraseSegmenter::new()),
        }
    }

    /// Replace the segmenter used for wrapped text.
    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    pub fn width(&self) -> u32 {
        self.dst.width()
    }

    pub fn height(&self) -> u32 {
        self.dst.height()
    }

    /// The style the next draw call starts from.
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn image(&self) -> &RgbaImage {
        &self.dst
    }

    pub fn into_image(self) -> RgbaImage {
        self.dst
    }

    /// Apply options without drawing. Either all of them take effect or none.
    pub fn apply_options(&mut self, options: &[StyleOption]) -> CanvasResult<()> {
        self.style = self.style.with_options(options)?;
        Ok(())
    }

    /// Draw `text` with the top of its first line at `start`.
    ///
    /// With a max width of 0 the text is painted as a single run. Otherwise it
    /// is segmented and packed into lines no wider than the max width (a lone
    /// oversized segment excepted), each starting at `start.x`, separated by
    /// line height plus line spacing.
    pub fn draw_text_at_point(
        &mut self,
        text: &str,
        start: Point,
        options: &[StyleOption],
    ) -> CanvasResult<()> {
        let face = self.commit_style(options)?;
        let metrics = face.metrics();

        let x = Fixed::from_px(start.x);
        self.dot = FixedPoint::new(x, Fixed::from_px(start.y) + metrics.height);

        if self.style.max_width == 0 {
            self.paint_text(face.as_ref(), text);
            tracing::debug!("Drew single line at ({}, {})", start.x, start.y);
            return Ok(());
        }

        let lines = pack_text(
            self.segmenter.as_ref(),
            self.style.segmentation,
            text,
            width_budget(self.style.max_width),
            face.as_ref(),
        );
        let advance = metrics.height + Fixed::from_px(self.style.line_spacing);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.dot = FixedPoint::new(x, self.dot.y + advance);
            }
            self.paint_text(face.as_ref(), line);
        }

        tracing::debug!(
            "Drew {} line(s) at ({}, {}) within {}px",
            lines.len(),
            start.x,
            start.y,
            self.style.max_width
        );
        Ok(())
    }

    /// Draw `texts` as a row of padded chips with their top edge at `start.y`.
    ///
    /// Each chip is filled with the background color when one is set, then
    /// its text is painted inside the padding. Box text never wraps.
    pub fn draw_box_texts<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        start: Point,
        options: &[StyleOption],
    ) -> CanvasResult<()> {
        let face = self.commit_style(options)?;
        let metrics = face.metrics();
        let padding = self.style.box_padding;

        let chips = layout_chips(
            texts,
            start,
            padding,
            self.style.box_spacing,
            self.style.box_align,
            metrics,
            |s| face.measure(s),
        );

        for chip in &chips {
            if let Some(bg) = self.style.bg {
                self.fill_rect(chip.rect, bg);
            }
            self.dot = FixedPoint::new(
                Fixed::from_px(chip.rect.x + padding.left),
                Fixed::from_px(chip.rect.y + padding.top) + metrics.height,
            );
            self.paint_text(face.as_ref(), &chip.text);
        }

        tracing::debug!(
            "Drew {} box text(s) at ({}, {}) aligned {}",
            chips.len(),
            start.x,
            start.y,
            self.style.box_align
        );
        Ok(())
    }

    /// Encode the canvas as PNG at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        self.dst.save_with_format(path, ImageFormat::Png)?;
        tracing::debug!("Saved {}x{} PNG to {}", self.width(), self.height(), path.display());
        Ok(())
    }

    /// Apply `options` and commit them only if they succeed and leave a face set.
    fn commit_style(&mut self, options: &[StyleOption]) -> CanvasResult<Arc<dyn FontFace>> {
        let style = self.style.with_options(options)?;
        let face = style.face.clone().ok_or(CanvasError::MissingFontFace)?;
        self.style = style;
        Ok(face)
    }

    /// Paint `text` at the cursor and advance the cursor by its width.
    fn paint_text(&mut self, face: &dyn FontFace, text: &str) {
        let (width, height) = self.dst.dimensions();
        let fg = self.style.fg;
        let dst = &mut self.dst;
        let advance = face.rasterize(text, self.dot, &mut |x, y, coverage| {
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                return;
            }
            blend_over(dst.get_pixel_mut(x as u32, y as u32), fg, coverage);
        });
        self.dot.x += advance;
    }

    /// Replace every pixel of `rect` that lies inside the canvas with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let clipped = rect.clip_to(self.dst.width(), self.dst.height());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.dst.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Pixel width as a packing budget, saturating at the largest `Fixed`.
fn width_budget(max_width: u32) -> Fixed {
    const MAX_PX: u32 = (i32::MAX >> 6) as u32;
    Fixed::from_px(max_width.min(MAX_PX) as i32)
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.dst.width())
            .field("height", &self.dst.height())
            .field("dot", &self.dot)
            .field("style", &self.style)
            .finish()
    }
}
