//! Mock implementation of Segmenter for testing.

use parking_lot::Mutex;
use titlecard_text::Segmenter;

/// Splits after each run of whitespace, keeping the whitespace on the
/// preceding segment, and records every input it sees.
#[derive(Debug, Default)]
pub struct RecordingSegmenter {
    inputs: Mutex<Vec<String>>,
}

impl RecordingSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts passed to `segment`, in call order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().len()
    }
}

impl Segmenter for RecordingSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        self.inputs.lock().push(text.to_string());

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_space = false;
        for ch in text.chars() {
            if in_space && !ch.is_whitespace() {
                segments.push(std::mem::take(&mut current));
            }
            in_space = ch.is_whitespace();
            current.push(ch);
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_after_whitespace() {
        let segmenter = RecordingSegmenter::new();
        assert_eq!(segmenter.segment("ab  cd e"), ["ab  ", "cd ", "e"]);
        assert!(segmenter.segment("").is_empty());
        assert_eq!(segmenter.call_count(), 2);
        assert_eq!(segmenter.inputs(), ["ab  cd e", ""]);
    }
}
