// WHY: One highlighting pass for daily, story and quiz text alike
// Longest phrase wins where snippets overlap; output is ascending by start

use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

use crate::matcher::{ByteMatch, BytePos, CharOffsets, CharPos, PhraseMatcher};

pub mod segments;
pub mod snippet;

pub use segments::{segments, Segment};
pub use snippet::{Snippet, SnippetId};

/// Half-open char range of one accepted snippet match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub snippet_id: SnippetId,
}

impl MatchSpan {
    /// The matched text, with the source's original casing
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let offsets = CharOffsets::new(text);
        let start = offsets.to_byte(CharPos(self.start)).0;
        let end = offsets.to_byte(CharPos(self.end)).0;
        &text[start..end]
    }
}

/// Counters for one highlighting pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightStats {
    pub snippets_considered: usize,
    /// Snippets with an empty phrase
    pub snippets_skipped: usize,
    pub candidates_found: usize,
    pub spans_accepted: usize,
    pub overlaps_suppressed: usize,
}

/// Stateless snippet highlighter
#[derive(Debug, Clone, Copy, Default)]
pub struct SnippetHighlighter;

impl SnippetHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Non-overlapping matches of every snippet, ascending by `start`
    pub fn highlight(&self, text: &str, snippets: &[Snippet]) -> Vec<MatchSpan> {
        self.highlight_with_stats(text, snippets).0
    }

    /// Spans plus counters. Every snippet is considered and empty phrases are
    /// counted as skipped, whatever the text.
    pub fn highlight_with_stats(
        &self,
        text: &str,
        snippets: &[Snippet],
    ) -> (Vec<MatchSpan>, HighlightStats) {
        let mut stats = HighlightStats::default();

        // Stable sort: equal-length phrases keep collection order, so the earlier snippet wins
        let mut ordered: Vec<&Snippet> = snippets.iter().collect();
        ordered.sort_by_key(|s| Reverse(s.phrase_len()));

        let mut accepted: Vec<(ByteMatch, &SnippetId)> = Vec::new();

        for snippet in ordered {
            stats.snippets_considered += 1;
            let Some(matcher) = PhraseMatcher::new(&snippet.original_text) else {
                debug!(snippet_id = %snippet.id, "Skipping snippet with empty phrase");
                stats.snippets_skipped += 1;
                continue;
            };

            let mut cursor = BytePos(0);
            while let Some(candidate) = matcher.find_at(text, cursor) {
                stats.candidates_found += 1;
                let conflict_end = accepted
                    .iter()
                    .filter(|(taken, _)| taken.overlaps(&candidate))
                    .map(|(taken, _)| taken.end)
                    .max();

                match conflict_end {
                    Some(end) => {
                        stats.overlaps_suppressed += 1;
                        cursor = end;
                    }
                    None => {
                        accepted.push((candidate, &snippet.id));
                        cursor = candidate.end;
                    }
                }
            }
        }

        accepted.sort_by_key(|(m, _)| m.start);
        stats.spans_accepted = accepted.len();

        let offsets = CharOffsets::new(text);
        let spans = accepted
            .into_iter()
            .map(|(m, id)| MatchSpan {
                start: offsets.to_char(m.start).0,
                end: offsets.to_char(m.end).0,
                snippet_id: id.clone(),
            })
            .collect();

        debug!(
            spans = stats.spans_accepted,
            suppressed = stats.overlaps_suppressed,
            "Highlight pass complete"
        );
        (spans, stats)
    }
}

/// Highlight `snippets` in `text`
pub fn highlight(text: &str, snippets: &[Snippet]) -> Vec<MatchSpan> {
    SnippetHighlighter::new().highlight(text, snippets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(text: &'a str, spans: &[MatchSpan]) -> Vec<&'a str> {
        spans.iter().map(|s| s.slice(text)).collect()
    }

    #[test]
    fn test_longest_phrase_wins() {
        let text = "I like to run fast.";
        let snippets = vec![Snippet::new(1, "run"), Snippet::new(2, "run fast")];
        let spans = highlight(text, &snippets);
        assert_eq!(
            spans,
            vec![MatchSpan {
                start: 10,
                end: 18,
                snippet_id: SnippetId::Number(2)
            }]
        );
    }

    #[test]
    fn test_shorter_phrase_matches_elsewhere() {
        let text = "I run fast, then I run slowly.";
        let snippets = vec![Snippet::new(1, "run"), Snippet::new(2, "run fast")];
        let spans = highlight(text, &snippets);
        assert_eq!(matched(text, &spans), vec!["run fast", "run"]);
        assert_eq!(spans[0].snippet_id, SnippetId::Number(2));
        assert_eq!(spans[1].snippet_id, SnippetId::Number(1));
    }

    #[test]
    fn test_ascending_order_and_case() {
        let text = "Der Hund und die Katze. Die KATZE schläft.";
        let snippets = vec![Snippet::new(1, "katze"), Snippet::new(2, "hund")];
        let spans = highlight(text, &snippets);
        assert_eq!(matched(text, &spans), vec!["Hund", "Katze", "KATZE"]);
        assert!(spans.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_equal_length_tie_first_in_collection_wins() {
        let text = "abcd";
        let snippets = vec![Snippet::new(1, "abc"), Snippet::new(2, "bcd")];
        let spans = highlight(text, &snippets);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].snippet_id, SnippetId::Number(1));

        let reversed = vec![Snippet::new(2, "bcd"), Snippet::new(1, "abc")];
        let spans = highlight(text, &reversed);
        assert_eq!(spans[0].snippet_id, SnippetId::Number(2));
    }

    #[test]
    fn test_partial_overlap_suppressed() {
        // "york city" is longer and taken first; "new york" overlaps it and is dropped
        let text = "new york city";
        let snippets = vec![Snippet::new(1, "york city"), Snippet::new(2, "new york")];
        let (spans, stats) = SnippetHighlighter::new().highlight_with_stats(text, &snippets);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].snippet_id, SnippetId::Number(1));
        assert_eq!(stats.overlaps_suppressed, 1);
    }

    #[test]
    fn test_resume_after_conflict() {
        let text = "aaa aaa";
        let snippets = vec![Snippet::new(1, "aaa a"), Snippet::new(2, "aa")];
        let spans = highlight(text, &snippets);
        assert_eq!(matched(text, &spans), vec!["aaa a", "aa"]);
        assert_eq!(spans[1].start, 5);
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let text = "Я люблю читать книги.";
        let spans = highlight(text, &[Snippet::new(1, "читать")]);
        assert_eq!((spans[0].start, spans[0].end), (8, 14));
    }

    #[test]
    fn test_accent_sensitive() {
        let spans = highlight("Un café noir", &[Snippet::new(1, "cafe")]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(highlight("anything", &[]).is_empty());
        assert!(highlight("", &[Snippet::new(1, "x")]).is_empty());
        let (spans, stats) =
            SnippetHighlighter::new().highlight_with_stats("text", &[Snippet::new(1, "")]);
        assert!(spans.is_empty());
        assert_eq!(stats.snippets_skipped, 1);
    }

    #[test]
    fn test_empty_text_counts_like_any_text() {
        let snippets = vec![Snippet::new(1, ""), Snippet::new(2, "x"), Snippet::new(3, "")];
        let highlighter = SnippetHighlighter::new();

        let (spans, empty_stats) = highlighter.highlight_with_stats("", &snippets);
        let (_, text_stats) = highlighter.highlight_with_stats("no match here", &snippets);
        assert!(spans.is_empty());
        assert_eq!(empty_stats.snippets_considered, 3);
        assert_eq!(empty_stats.snippets_skipped, 2);
        assert_eq!(empty_stats.snippets_skipped, text_stats.snippets_skipped);
        assert_eq!(empty_stats.spans_accepted, 0);
    }

    #[test]
    fn test_length_is_counted_in_chars_not_bytes() {
        // "本xyz" is 4 chars / 6 bytes, "日日本" is 3 chars / 9 bytes
        let text = "日日本xyz";
        let snippets = vec![Snippet::new(1, "日日本"), Snippet::new(2, "本xyz")];
        let (spans, stats) = SnippetHighlighter::new().highlight_with_stats(text, &snippets);
        assert_eq!(
            spans,
            vec![MatchSpan {
                start: 2,
                end: 6,
                snippet_id: SnippetId::Number(2)
            }]
        );
        assert_eq!(stats.overlaps_suppressed, 1);
    }

    #[test]
    fn test_long_phrase_highlighted() {
        let phrase = "abcdefghij".repeat(20_000);
        let text = format!("Intro. {phrase} end! Tail.");
        let snippets = vec![Snippet::new(1, phrase.as_str()), Snippet::new(2, "tail")];
        let spans = highlight(&text, &snippets);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (7, 7 + phrase.len()));
        assert_eq!(spans[1].snippet_id, SnippetId::Number(2));
    }

    #[test]
    fn test_idempotent() {
        let text = "la casa blanca y la casa roja";
        let snippets = vec![
            Snippet::new(1, "casa"),
            Snippet::new(2, "la casa"),
            Snippet::new(3, "roja"),
        ];
        assert_eq!(highlight(text, &snippets), highlight(text, &snippets));
    }

    #[test]
    fn test_stats_counts() {
        let text = "run run run";
        let (_, stats) =
            SnippetHighlighter::new().highlight_with_stats(text, &[Snippet::new(1, "run")]);
        assert_eq!(stats.snippets_considered, 1);
        assert_eq!(stats.candidates_found, 3);
        assert_eq!(stats.spans_accepted, 3);
        assert_eq!(stats.overlaps_suppressed, 0);
    }
}
