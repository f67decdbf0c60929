// Full-text sentence splitting with the same hard-delimiter rules as extraction

use super::{ExtractedSentence, SentenceBoundaryRules};

/// Split `text` into sentences using the default delimiters
pub fn split_sentences(text: &str) -> Vec<ExtractedSentence> {
    split_with_rules(text, &SentenceBoundaryRules::default())
}

/// Every delimiter closes the current sentence (delimiter included).
/// Whitespace-only pieces, such as the gap after "!\n", are dropped.
pub(crate) fn split_with_rules(
    text: &str,
    rules: &SentenceBoundaryRules,
) -> Vec<ExtractedSentence> {
    let mut sentences = Vec::new();
    let mut piece_start = 0;

    for (idx, ch) in text.char_indices() {
        if rules.is_delimiter(ch) {
            let piece_end = idx + ch.len_utf8();
            let piece = ExtractedSentence::from_byte_range(text, piece_start, piece_end);
            if let Some(sentence) = piece {
                sentences.push(sentence);
            }
            piece_start = piece_end;
        }
    }

    if let Some(sentence) = ExtractedSentence::from_byte_range(text, piece_start, text.len()) {
        sentences.push(sentence);
    }

    sentences
}
