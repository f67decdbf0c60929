pub mod annotate;
pub mod coerce;
pub mod draft;
pub mod highlighter;
pub mod matcher;
pub mod reader;
pub mod sentence_extractor;
pub mod stats;

// Re-export main types for convenient access
pub use sentence_extractor::{
    extract_sentence, split_sentences, strip_quotes, ExtractedSentence, SentenceBoundaryRules,
    SentenceExtractor,
};

pub use highlighter::{
    highlight, segments, HighlightStats, MatchSpan, Segment, Snippet, SnippetHighlighter,
    SnippetId,
};

pub use annotate::{annotate, Annotation, Annotator};
pub use draft::{CreateSnippetRequest, SnippetDraft};
