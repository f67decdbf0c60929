// Render-ready split of a text into plain and highlighted runs

use serde::Serialize;

use super::{MatchSpan, SnippetId};
use crate::matcher::{CharOffsets, CharPos};

/// A contiguous run of the source text; `snippet_id` is set for highlighted runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_id: Option<SnippetId>,
}

impl Segment {
    pub fn is_highlighted(&self) -> bool {
        self.snippet_id.is_some()
    }
}

/// Split `text` along `spans`. Concatenating the segment texts gives back `text`.
/// Spans that are empty, out of range, or overlap an earlier span are ignored.
pub fn segments(text: &str, spans: &[MatchSpan]) -> Vec<Segment> {
    let offsets = CharOffsets::new(text);
    let char_len = offsets.char_len();

    let mut ordered: Vec<&MatchSpan> = spans
        .iter()
        .filter(|s| s.start < s.end && s.end <= char_len)
        .collect();
    ordered.sort_by_key(|s| s.start);

    let slice = |start: usize, end: usize| -> String {
        let from = offsets.to_byte(CharPos(start)).0;
        let to = offsets.to_byte(CharPos(end)).0;
        text[from..to].to_string()
    };

    let mut result = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0;
    for span in ordered {
        if span.start < cursor {
            continue;
        }
        if span.start > cursor {
            result.push(Segment {
                text: slice(cursor, span.start),
                start: cursor,
                end: span.start,
                snippet_id: None,
            });
        }
        result.push(Segment {
            text: slice(span.start, span.end),
            start: span.start,
            end: span.end,
            snippet_id: Some(span.snippet_id.clone()),
        });
        cursor = span.end;
    }

    if cursor < char_len {
        result.push(Segment {
            text: slice(cursor, char_len),
            start: cursor,
            end: char_len,
            snippet_id: None,
        });
    }

    result
}
