// WHY: Shared case-insensitive phrase search for sentence extraction and snippet highlighting
// Searches run on byte offsets; callers convert to char offsets through CharOffsets

use regex_automata::{meta::Regex, Input};
use tracing::debug;

/// 0-based byte position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct BytePos(pub usize);

/// 0-based character position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct CharPos(pub usize);

/// Half-open byte range of one phrase occurrence
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ByteMatch {
    pub start: BytePos,
    pub end: BytePos,
}

impl ByteMatch {
    /// True when the two half-open ranges share at least one byte
    pub fn overlaps(&self, other: &ByteMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Phrases longer than this skip the regex and use the char scan.
/// Case-folded literals this long can exceed the regex NFA size limit.
const MAX_REGEX_PHRASE_CHARS: usize = 4096;

/// Literal phrase, matched case-insensitively (Unicode simple case folding).
/// Accents are part of the literal: "cafe" does not match "café".
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    strategy: Strategy,
}

#[derive(Debug, Clone)]
enum Strategy {
    Regex(Regex),
    Scan(Vec<char>),
}

impl PhraseMatcher {
    /// Compile a phrase. Returns `None` only for an empty phrase, which never matches.
    pub fn new(phrase: &str) -> Option<Self> {
        if phrase.is_empty() {
            return None;
        }

        let char_len = phrase.chars().count();
        if char_len > MAX_REGEX_PHRASE_CHARS {
            debug!(char_len, "Long phrase, using char scan");
            return Some(Self::scan(phrase));
        }

        let pattern = format!("(?i){}", regex_syntax::escape(phrase));
        match Regex::new(&pattern) {
            Ok(regex) => Some(Self {
                strategy: Strategy::Regex(regex),
            }),
            Err(e) => {
                debug!(char_len, error = %e, "Phrase regex rejected, using char scan");
                Some(Self::scan(phrase))
            }
        }
    }

    fn scan(phrase: &str) -> Self {
        Self {
            strategy: Strategy::Scan(phrase.chars().collect()),
        }
    }

    /// First occurrence starting at or after byte `from`
    pub fn find_at(&self, text: &str, from: BytePos) -> Option<ByteMatch> {
        if from.0 > text.len() || !text.is_char_boundary(from.0) {
            return None;
        }
        match &self.strategy {
            Strategy::Regex(regex) => {
                let input = Input::new(text).range(from.0..);
                regex.find(input).map(|m| ByteMatch {
                    start: BytePos(m.start()),
                    end: BytePos(m.end()),
                })
            }
            Strategy::Scan(phrase) => scan_at(text, from, phrase),
        }
    }

    /// First occurrence in the whole text
    pub fn find_first(&self, text: &str) -> Option<ByteMatch> {
        self.find_at(text, BytePos(0))
    }

    /// All non-overlapping occurrences, left to right
    pub fn find_all(&self, text: &str) -> Vec<ByteMatch> {
        let mut matches = Vec::new();
        let mut cursor = BytePos(0);
        while let Some(m) = self.find_at(text, cursor) {
            matches.push(m);
            cursor = m.end;
        }
        matches
    }
}

/// Char-by-char case-insensitive search from `from`
fn scan_at(text: &str, from: BytePos, phrase: &[char]) -> Option<ByteMatch> {
    let first = *phrase.first()?;
    let rest = &text[from.0..];
    for (offset, ch) in rest.char_indices() {
        if !chars_match(ch, first) {
            continue;
        }
        let start = from.0 + offset;
        let mut end = start;
        let mut candidate = text[start..].chars();
        let matched = phrase.iter().all(|&want| match candidate.next() {
            Some(got) if chars_match(got, want) => {
                end += got.len_utf8();
                true
            }
            _ => false,
        });
        if matched {
            return Some(ByteMatch {
                start: BytePos(start),
                end: BytePos(end),
            });
        }
    }
    None
}

/// Case-insensitive equality of two chars.
/// Lowercase catches Kelvin sign vs 'k', uppercase catches long s vs 's'.
fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}

/// Byte <-> char offset mapping for one text.
/// Built once per pass so repeated conversions stay O(log n).
#[derive(Debug, Clone)]
pub struct CharOffsets {
    byte_starts: Vec<usize>,
    text_len: usize,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        Self {
            byte_starts: text.char_indices().map(|(i, _)| i).collect(),
            text_len: text.len(),
        }
    }

    /// Number of chars in the text
    pub fn char_len(&self) -> usize {
        self.byte_starts.len()
    }

    /// Char index of a byte offset that lies on a char boundary (or the text end)
    pub fn to_char(&self, pos: BytePos) -> CharPos {
        match self.byte_starts.binary_search(&pos.0) {
            Ok(idx) | Err(idx) => CharPos(idx),
        }
    }

    /// Byte offset of a char index; indices past the end clamp to the text length
    pub fn to_byte(&self, pos: CharPos) -> BytePos {
        BytePos(self.byte_starts.get(pos.0).copied().unwrap_or(self.text_len))
    }
}
