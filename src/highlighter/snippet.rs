// Vocabulary snippet as delivered by the snippets API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque snippet identifier. The API uses integers; string ids are accepted
/// so locally created (not yet synced) snippets can be highlighted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetId::Number(n) => write!(f, "{n}"),
            SnippetId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for SnippetId {
    fn from(id: i64) -> Self {
        SnippetId::Number(id)
    }
}

impl From<&str> for SnippetId {
    fn from(id: &str) -> Self {
        SnippetId::Text(id.to_string())
    }
}

impl From<String> for SnippetId {
    fn from(id: String) -> Self {
        SnippetId::Text(id)
    }
}

/// A saved vocabulary phrase. Only `id` and `original_text` drive matching;
/// the rest rides along for the link target of a highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    #[serde(alias = "originalText")]
    pub original_text: String,
    #[serde(default, alias = "translatedText", skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, alias = "sourceLanguage", skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default, alias = "targetLanguage", skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, alias = "questionId", skip_serializing_if = "Option::is_none")]
    pub question_id: Option<i64>,
    #[serde(default, alias = "difficultyLevel", skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
}

impl Snippet {
    /// Snippet with only the fields matching needs
    pub fn new(id: impl Into<SnippetId>, original_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_text: original_text.into(),
            translated_text: None,
            source_language: None,
            target_language: None,
            context: None,
            question_id: None,
            difficulty_level: None,
        }
    }

    /// Length of the search phrase in chars, the ordering key for highlighting
    pub fn phrase_len(&self) -> usize {
        self.original_text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "id": 42,
            "original_text": "la casa",
            "translated_text": "the house",
            "source_language": "es",
            "target_language": "en",
            "question_id": 7,
            "context": "Vivo en la casa azul.",
            "difficulty_level": "A2",
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let snippet: Snippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.id, SnippetId::Number(42));
        assert_eq!(snippet.original_text, "la casa");
        assert_eq!(snippet.question_id, Some(7));
        assert_eq!(snippet.difficulty_level.as_deref(), Some("A2"));
    }

    #[test]
    fn test_deserialize_camel_case_and_string_id() {
        let json = r#"{"id": "local-1", "originalText": "Straße"}"#;
        let snippet: Snippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.id, SnippetId::Text("local-1".into()));
        assert_eq!(snippet.original_text, "Straße");
        assert_eq!(snippet.translated_text, None);
    }

    #[test]
    fn test_phrase_len_counts_chars() {
        assert_eq!(Snippet::new(1, "日本語").phrase_len(), 3);
        assert_eq!(Snippet::new(1, "abc").phrase_len(), 3);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SnippetId::from(5).to_string(), "5");
        assert_eq!(SnippetId::from("x-1").to_string(), "x-1");
    }
}
