// WHY: Bookmarking a selection sends the phrase plus the sentence it came from
// The request body mirrors the snippets API create payload

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentence_extractor::{normalize_sentence, strip_quotes, SentenceExtractor};

/// Body of a "create snippet" API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSnippetRequest {
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    pub source_language: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Snippet creation request under construction
#[derive(Debug, Clone)]
pub struct SnippetDraft {
    request: CreateSnippetRequest,
}

impl SnippetDraft {
    /// Draft for `selected` inside `text`, using the default sentence delimiters
    pub fn from_selection(
        text: &str,
        selected: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self> {
        Self::from_selection_with(
            &SentenceExtractor::with_default_rules(),
            text,
            selected,
            source_language,
            target_language,
        )
    }

    pub fn from_selection_with(
        extractor: &SentenceExtractor,
        text: &str,
        selected: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self> {
        let original_text = selected.trim();
        if original_text.is_empty() {
            bail!("Selection is empty");
        }
        let source_language = source_language.trim();
        let target_language = target_language.trim();
        if source_language.is_empty() || target_language.is_empty() {
            bail!(
                "Source and target language are required \
                 (got source={source_language:?}, target={target_language:?})"
            );
        }

        let context = extractor
            .extract(text, original_text)
            .map(|sentence| normalize_sentence(strip_quotes(&sentence.text)))
            .filter(|sentence| !sentence.is_empty());
        debug!(has_context = context.is_some(), "Built snippet draft");

        Ok(Self {
            request: CreateSnippetRequest {
                original_text: original_text.to_string(),
                translated_text: None,
                source_language: source_language.to_lowercase(),
                target_language: target_language.to_lowercase(),
                question_id: None,
                context,
            },
        })
    }

    pub fn with_question_id(mut self, question_id: i64) -> Self {
        self.request.question_id = Some(question_id);
        self
    }

    pub fn with_translation(mut self, translated_text: impl Into<String>) -> Self {
        let translated = translated_text.into();
        let translated = translated.trim();
        self.request.translated_text = (!translated.is_empty()).then(|| translated.to_string());
        self
    }

    pub fn context(&self) -> Option<&str> {
        self.request.context.as_deref()
    }

    pub fn request(&self) -> &CreateSnippetRequest {
        &self.request
    }

    pub fn into_request(self) -> CreateSnippetRequest {
        self.request
    }
}
