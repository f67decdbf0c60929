// WHY: A reading view needs the selected sentence and the snippet highlights of the
// same text together; this runs both passes once and hands back a single value

use serde::Serialize;

use crate::highlighter::{segments, HighlightStats, MatchSpan, Segment, Snippet, SnippetHighlighter};
use crate::sentence_extractor::{ExtractedSentence, SentenceBoundaryRules, SentenceExtractor};

/// Everything a reading view renders for one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Sentence around the selection, when a selection was given and found
    pub sentence: Option<ExtractedSentence>,
    pub spans: Vec<MatchSpan>,
    pub segments: Vec<Segment>,
    pub stats: HighlightStats,
    pub chars_processed: usize,
}

/// Extractor and highlighter sharing one configuration
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    extractor: SentenceExtractor,
    highlighter: SnippetHighlighter,
}

impl Annotator {
    pub fn new(rules: SentenceBoundaryRules) -> Self {
        Self {
            extractor: SentenceExtractor::new(rules),
            highlighter: SnippetHighlighter::new(),
        }
    }

    pub fn with_default_rules() -> Self {
        Self::new(SentenceBoundaryRules::default())
    }

    pub fn extractor(&self) -> &SentenceExtractor {
        &self.extractor
    }

    pub fn annotate(&self, text: &str, selected: Option<&str>, snippets: &[Snippet]) -> Annotation {
        let sentence = selected.and_then(|s| self.extractor.extract(text, s));
        let (spans, stats) = self.highlighter.highlight_with_stats(text, snippets);
        let segments = segments(text, &spans);

        Annotation {
            sentence,
            spans,
            segments,
            stats,
            chars_processed: text.chars().count(),
        }
    }
}

/// Annotate with the default delimiters
pub fn annotate(text: &str, selected: Option<&str>, snippets: &[Snippet]) -> Annotation {
    Annotator::with_default_rules().annotate(text, selected, snippets)
}
