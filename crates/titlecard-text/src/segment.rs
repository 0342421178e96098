//! Script-aware segmentation into line-break units.
//!
//! Splitting on whitespace fails for scripts without spaces, and splitting on
//! every character breaks words apart and strands punctuation at the start of
//! a line. [`PhraseSegmenter`] sits in between: it tokenizes on Unicode word
//! boundaries (UAX #29) and then regroups the tokens into phrases, keeping
//! Japanese particles and okurigana attached to their word and punctuation
//! attached to the text it follows.
//!
//! [`SegmentationLevel`] optionally caps the length of every segment so that
//! long unbroken phrases still wrap.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into ordered, non-empty break units.
///
/// Concatenating the returned segments must reproduce the input exactly.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;

    /// Segment, then split long segments according to `level`.
    fn segment_with_level(&self, text: &str, level: SegmentationLevel) -> Vec<String> {
        level.refine(self.segment(text))
    }
}

impl<S: Segmenter + ?Sized> Segmenter for Arc<S> {
    fn segment(&self, text: &str) -> Vec<String> {
        (**self).segment(text)
    }

    fn segment_with_level(&self, text: &str, level: SegmentationLevel) -> Vec<String> {
        (**self).segment_with_level(text, level)
    }
}

/// Granularity of segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentationLevel {
    /// Phrase segmentation only.
    #[default]
    Default,
    /// Split segments longer than 6 grapheme clusters.
    Fine,
    /// Split segments longer than 3 grapheme clusters.
    UltraFine,
}

impl SegmentationLevel {
    /// Maximum segment length in grapheme clusters, if any.
    pub fn threshold(self) -> Option<usize> {
        match self {
            SegmentationLevel::Default => None,
            SegmentationLevel::Fine => Some(6),
            SegmentationLevel::UltraFine => Some(3),
        }
    }

    /// Split every segment longer than [`threshold`](Self::threshold).
    pub fn refine(self, segments: Vec<String>) -> Vec<String> {
        let Some(max_len) = self.threshold() else {
            return segments;
        };

        let mut result = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.graphemes(true).count() > max_len {
                result.extend(split_long_segment(&segment, max_len));
            } else {
                result.push(segment);
            }
        }
        result
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentationLevel::Default => "default",
            SegmentationLevel::Fine => "fine",
            SegmentationLevel::UltraFine => "ultra-fine",
        }
    }
}

impl FromStr for SegmentationLevel {
    type Err = Infallible;

    /// Lenient: unknown names fall back to [`SegmentationLevel::Default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "fine" => SegmentationLevel::Fine,
            "ultra-fine" | "ultrafine" => SegmentationLevel::UltraFine,
            _ => SegmentationLevel::Default,
        })
    }
}

impl From<String> for SegmentationLevel {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }
}

impl From<SegmentationLevel> for String {
    fn from(level: SegmentationLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for SegmentationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `segment` into consecutive chunks of at most `max_len` grapheme
/// clusters. A `max_len` of zero returns the segment unchanged.
pub fn split_long_segment(segment: &str, max_len: usize) -> Vec<String> {
    if segment.is_empty() {
        return Vec::new();
    }
    if max_len == 0 {
        return vec![segment.to_string()];
    }

    let graphemes: Vec<&str> = segment.graphemes(true).collect();
    graphemes.chunks(max_len).map(|chunk| chunk.concat()).collect()
}

/// Phrase segmenter built on Unicode word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseSegmenter;

impl PhraseSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for PhraseSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut current = String::new();
        // Class of the last non-whitespace token in `current`.
        let mut last: Option<TokenClass> = None;
        let mut trailing_space = false;
        let mut open_pending = false;

        for token in text.split_word_bounds() {
            let class = TokenClass::of(token);
            let after_kana_or_han = matches!(
                last,
                Some(TokenClass::Han | TokenClass::Hiragana | TokenClass::Katakana)
            );
            let join = match class {
                TokenClass::Space | TokenClass::Close | TokenClass::CloseBracket => true,
                _ if open_pending => true,
                _ if trailing_space => false,
                _ if starts_with_continuation(token) => after_kana_or_han,
                TokenClass::Open | TokenClass::Other => false,
                TokenClass::Han => last == Some(TokenClass::Han),
                TokenClass::Hiragana => {
                    after_kana_or_han || last == Some(TokenClass::CloseBracket)
                }
                TokenClass::Katakana => last == Some(TokenClass::Katakana),
            };

            if !join && !current.is_empty() {
                phrases.push(std::mem::take(&mut current));
                last = None;
                trailing_space = false;
            }
            current.push_str(token);

            match class {
                TokenClass::Space => trailing_space = true,
                TokenClass::Open => {
                    open_pending = true;
                    trailing_space = false;
                    last = Some(class);
                }
                _ => {
                    open_pending = false;
                    trailing_space = false;
                    last = Some(class);
                }
            }
        }

        if !current.is_empty() {
            phrases.push(current);
        }
        phrases
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Space,
    /// Punctuation that must not start a line.
    Close,
    /// Closing brackets and quotes; a following particle stays attached.
    CloseBracket,
    /// Opening brackets and quotes that must not end a line.
    Open,
    Han,
    Hiragana,
    Katakana,
    Other,
}

impl TokenClass {
    fn of(token: &str) -> Self {
        if token.chars().all(char::is_whitespace) {
            return TokenClass::Space;
        }
        if token.chars().all(is_closing_bracket) {
            return TokenClass::CloseBracket;
        }
        if token.chars().all(is_no_break_before) {
            return TokenClass::Close;
        }
        if token.chars().all(is_opening_bracket) {
            return TokenClass::Open;
        }
        match token.chars().next() {
            Some(c) if is_han(c) => TokenClass::Han,
            Some(c) if is_hiragana(c) => TokenClass::Hiragana,
            Some(c) if is_katakana(c) => TokenClass::Katakana,
            _ => TokenClass::Other,
        }
    }
}

fn is_han(c: char) -> bool {
    matches!(c,
        '\u{3005}'..='\u{3007}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FFFF}')
}

fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{309F}')
}

fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}')
}

// Small kana, the prolonged sound mark and iteration marks continue the
// word before them.
fn starts_with_continuation(token: &str) -> bool {
    token.chars().next().is_some_and(|c| {
        matches!(
            c,
            'ぁ' | 'ぃ' | 'ぅ' | 'ぇ' | 'ぉ' | 'っ' | 'ゃ' | 'ゅ' | 'ょ' | 'ゎ' | 'ゕ' | 'ゖ'
                | 'ァ' | 'ィ' | 'ゥ' | 'ェ' | 'ォ' | 'ッ' | 'ャ' | 'ュ' | 'ョ' | 'ヮ' | 'ヵ' | 'ヶ'
                | 'ㇰ'..='ㇿ'
                | 'ｧ'..='ｯ'
                | 'ー' | 'ｰ' | 'ゝ' | 'ゞ' | 'ヽ' | 'ヾ' | '々'
        )
    })
}

fn is_closing_bracket(c: char) -> bool {
    matches!(
        c,
        ')' | ']' | '}'
            | '）' | '」' | '』' | '】' | '〕' | '〉' | '》' | '〙' | '〗' | '］' | '｝' | '〟'
            | '’' | '”' | '｠' | '»' | '｣'
    )
}

// Line-start prohibited punctuation (kinsoku) plus ASCII closing punctuation.
fn is_no_break_before(c: char) -> bool {
    is_closing_bracket(c)
        || matches!(
            c,
            ',' | '.' | ':' | ';' | '!' | '?' | '>' | '%'
                | '、' | '。' | '，' | '．' | '・' | '：' | '；' | '？' | '！'
                | '‼' | '⁇' | '⁈' | '⁉' | '…' | '‥' | '〜' | '～' | '｡' | '､' | '･'
        )
}

fn is_opening_bracket(c: char) -> bool {
    matches!(
        c,
        '(' | '[' | '{' | '<'
            | '（' | '「' | '『' | '【' | '〔' | '〈' | '《' | '〘' | '〖' | '［' | '｛' | '〝'
            | '‘' | '“' | '｟' | '«' | '｢'
    )
}
