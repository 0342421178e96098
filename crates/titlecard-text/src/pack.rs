//! Greedy line packing.

use titlecard_core::Fixed;

use crate::face::FontFace;
use crate::segment::{SegmentationLevel, Segmenter};

/// Pack `segments` into lines no wider than `max_width`.
///
/// Single greedy pass, one decision per segment: a segment joins the current
/// line when the measured width of `line + segment` is `<= max_width`,
/// otherwise the current line is finished and the segment (minus its leading
/// whitespace) starts the next one. Finished lines are right-trimmed and
/// lines that trim to nothing are dropped.
///
/// A segment wider than `max_width` on its own ends up alone on its line; it
/// is never split or dropped here. Use [`SegmentationLevel`] to bound segment
/// length before packing.
pub fn pack_lines<S, F>(segments: &[S], max_width: Fixed, mut measure: F) -> Vec<String>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Fixed,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }

        let mut candidate = String::with_capacity(line.len() + segment.len());
        candidate.push_str(&line);
        candidate.push_str(segment);

        if measure(&candidate) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            finish_line(&mut lines, &line);
        }
        line = segment.trim_start().to_string();
    }

    if !line.is_empty() {
        finish_line(&mut lines, &line);
    }
    lines
}

fn finish_line(lines: &mut Vec<String>, line: &str) {
    let trimmed = line.trim_end();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
}

/// Segment `text` with `segmenter` at `level` and pack it against `face`.
pub fn pack_text(
    segmenter: &dyn Segmenter,
    level: SegmentationLevel,
    text: &str,
    max_width: Fixed,
    face: &dyn FontFace,
) -> Vec<String> {
    let segments = segmenter.segment_with_level(text, level);
    pack_lines(&segments, max_width, |s| face.measure(s))
}
