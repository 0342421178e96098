//! Box text layout.

use titlecard_core::{Fixed, Padding, Point, Rect};
use titlecard_text::FaceMetrics;

use crate::style::BoxAlign;

/// One box text entry and the rectangle it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub text: String,
    pub rect: Rect,
}

/// Lay out `texts` as a row of chips starting at `start`.
///
/// Each chip is `round(width) + padding.left + padding.right` wide and
/// `round(height) + padding.top + padding.bottom + round(descent)` tall, with
/// its top edge at `start.y`. Chips are `spacing` pixels apart. With
/// [`BoxAlign::Right`] the row is shifted left so the last chip's right edge
/// is exactly `start.x`.
///
/// `measure` is called once per text.
pub fn layout_chips<S, F>(
    texts: &[S],
    start: Point,
    padding: Padding,
    spacing: i32,
    align: BoxAlign,
    metrics: FaceMetrics,
    mut measure: F,
) -> Vec<Chip>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Fixed,
{
    if texts.is_empty() {
        return Vec::new();
    }

    let widths: Vec<i32> = texts
        .iter()
        .map(|text| measure(text.as_ref()).round() + padding.horizontal())
        .collect();
    let height = metrics.height.round() + padding.vertical() + metrics.descent.round();

    let mut x = match align {
        BoxAlign::Left => start.x,
        BoxAlign::Right => {
            let gaps = spacing * (texts.len() as i32 - 1);
            start.x - widths.iter().sum::<i32>() - gaps
        }
    };

    texts
        .iter()
        .zip(widths)
        .map(|(text, width)| {
            let rect = Rect::new(x, start.y, width, height);
            x = rect.right() + spacing;
            Chip {
                text: text.as_ref().to_string(),
                rect,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FaceMetrics {
        FaceMetrics::new(Fixed::from_px(10), Fixed::from_px(8), Fixed::from_px(2))
    }

    // Five pixels per char.
    fn five(s: &str) -> Fixed {
        Fixed::from_px(5 * s.chars().count() as i32)
    }

    #[test]
    fn test_empty_input() {
        let texts: [&str; 0] = [];
        let chips = layout_chips(
            &texts,
            Point::new(0, 0),
            Padding::uniform(2),
            4,
            BoxAlign::Right,
            metrics(),
            five,
        );
        assert!(chips.is_empty());
    }

    #[test]
    fn test_left_layout() {
        let chips = layout_chips(
            &["A", "BB", "C"],
            Point::new(10, 10),
            Padding::uniform(2),
            4,
            BoxAlign::Left,
            metrics(),
            five,
        );
        let lefts: Vec<i32> = chips.iter().map(|c| c.rect.x).collect();
        let widths: Vec<i32> = chips.iter().map(|c| c.rect.width).collect();
        assert_eq!(lefts, [10, 23, 41]);
        assert_eq!(widths, [9, 14, 9]);
        assert!(chips.iter().all(|c| c.rect.y == 10 && c.rect.height == 16));
        assert!(chips.windows(2).all(|w| !w[0].rect.intersects(&w[1].rect)));
    }

    #[test]
    fn test_right_layout_ends_at_anchor() {
        let chips = layout_chips(
            &["A", "BB", "C"],
            Point::new(100, 0),
            Padding::uniform(2),
            4,
            BoxAlign::Right,
            metrics(),
            five,
        );
        let lefts: Vec<i32> = chips.iter().map(|c| c.rect.x).collect();
        assert_eq!(lefts, [60, 73, 91]);
        assert_eq!(chips.last().map(|c| c.rect.right()), Some(100));
    }

    #[test]
    fn test_sub_pixel_widths_round_per_chip() {
        let measure = |s: &str| Fixed::from_f32(2.5 * s.chars().count() as f32);
        let chips = layout_chips(
            &["a", "a"],
            Point::new(50, 0),
            Padding::default(),
            0,
            BoxAlign::Right,
            metrics(),
            measure,
        );
        // 2.5 rounds up to 3 for each chip.
        assert_eq!(chips[0].rect, Rect::new(44, 0, 3, 12));
        assert_eq!(chips[1].rect.right(), 50);
    }

    #[test]
    fn test_measures_each_text_once() {
        let mut calls = Vec::new();
        layout_chips(
            &["x", "yy"],
            Point::default(),
            Padding::default(),
            1,
            BoxAlign::Right,
            metrics(),
            |s| {
                calls.push(s.to_string());
                five(s)
            },
        );
        assert_eq!(calls, ["x", "yy"]);
    }
}
