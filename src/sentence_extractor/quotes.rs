// Quote and bracket trimming for sentences lifted out of dialog or parentheticals

/// Opening/closing quotes and brackets removed from sentence edges
const WRAPPING_CHARS: &[char] = &[
    '"', '\'', '«', '»', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '„', '‚', '‹', '›',
    '(', ')', '[', ']', '{', '}',
    '（', '）', '［', '］', '｛', '｝', '「', '」', '『', '』',
];

fn is_wrapping(ch: char) -> bool {
    WRAPPING_CHARS.contains(&ch)
}

/// Trim whitespace and wrapping quotes/brackets from both ends until stable.
/// Terminal punctuation is kept: `«Привет!»` becomes `Привет!`.
pub fn strip_quotes(sentence: &str) -> &str {
    let mut trimmed = sentence.trim();
    loop {
        let before = trimmed.len();
        trimmed = trimmed
            .strip_prefix(is_wrapping)
            .unwrap_or(trimmed)
            .trim_start();
        trimmed = trimmed
            .strip_suffix(is_wrapping)
            .unwrap_or(trimmed)
            .trim_end();
        if trimmed.len() == before {
            return trimmed;
        }
    }
}
