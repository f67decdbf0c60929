// WHY: Sentence lookup around a user selection, shared by every reading surface
// Delimiters are hard boundaries: "Mr." and "3.5" split sentences like any other period

use serde::Serialize;
use tracing::debug;

use crate::matcher::{BytePos, PhraseMatcher};

pub mod normalization;
pub mod quotes;
pub mod splitter;

pub use normalization::{normalize_sentence, normalize_sentence_into};
pub use quotes::strip_quotes;
pub use splitter::split_sentences;

/// Configuration for sentence boundary detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBoundaryRules {
    /// Characters that end a sentence; each one is included in the sentence it ends
    pub delimiters: Vec<char>,
}

impl SentenceBoundaryRules {
    pub fn new(delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            delimiters: delimiters.into_iter().collect(),
        }
    }

    pub fn is_delimiter(&self, ch: char) -> bool {
        self.delimiters.contains(&ch)
    }
}

impl Default for SentenceBoundaryRules {
    fn default() -> Self {
        Self {
            delimiters: vec!['.', '!', '?', '\n'],
        }
    }
}

/// A trimmed sentence and its half-open char offsets in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedSentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ExtractedSentence {
    /// Build from a byte range of `source`, trimming whitespace.
    /// Returns `None` when nothing but whitespace remains.
    pub(crate) fn from_byte_range(source: &str, start: usize, end: usize) -> Option<Self> {
        let raw = &source[start..end];
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lead = raw.len() - raw.trim_start().len();
        let trimmed_start = start + lead;
        let char_start = source[..trimmed_start].chars().count();
        Some(Self {
            text: trimmed.to_string(),
            start: char_start,
            end: char_start + trimmed.chars().count(),
        })
    }

    /// Whitespace-collapsed copy of the sentence
    pub fn normalize(&self) -> String {
        normalize_sentence(&self.text)
    }
}

/// Sentence extractor bound to one set of boundary rules
#[derive(Debug, Clone, Default)]
pub struct SentenceExtractor {
    rules: SentenceBoundaryRules,
}

impl SentenceExtractor {
    pub fn new(rules: SentenceBoundaryRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(SentenceBoundaryRules::default())
    }

    /// Smallest delimiter-bounded sentence around the first case-insensitive
    /// occurrence of `selected`. Later occurrences are ignored.
    pub fn extract(&self, text: &str, selected: &str) -> Option<ExtractedSentence> {
        let matcher = PhraseMatcher::new(selected)?;
        let Some(found) = matcher.find_first(text) else {
            debug!(selected_len = selected.len(), "Selection not found in text");
            return None;
        };

        let start = self.sentence_start(text, found.start);
        let end = self.sentence_end(text, found.end);
        ExtractedSentence::from_byte_range(text, start, end)
    }

    /// Byte offset just past the last delimiter before `from`, or 0
    fn sentence_start(&self, text: &str, from: BytePos) -> usize {
        text[..from.0]
            .char_indices()
            .rev()
            .find(|&(_, ch)| self.rules.is_delimiter(ch))
            .map(|(idx, ch)| idx + ch.len_utf8())
            .unwrap_or(0)
    }

    /// Byte offset just past the first delimiter at or after `from`, or the text end
    fn sentence_end(&self, text: &str, from: BytePos) -> usize {
        text[from.0..]
            .char_indices()
            .find(|&(_, ch)| self.rules.is_delimiter(ch))
            .map(|(idx, ch)| from.0 + idx + ch.len_utf8())
            .unwrap_or(text.len())
    }

    /// All sentences of `text` under these rules
    pub fn split(&self, text: &str) -> Vec<ExtractedSentence> {
        splitter::split_with_rules(text, &self.rules)
    }
}

/// Extract the sentence around `selected` using the default delimiters
pub fn extract_sentence(text: &str, selected: &str) -> Option<ExtractedSentence> {
    SentenceExtractor::with_default_rules().extract(text, selected)
}
