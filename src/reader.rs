use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::highlighter::Snippet;

/// Configuration for input reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Inputs larger than this are rejected (default: 8 MiB)
    pub max_input_bytes: usize,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 8 * 1024 * 1024,
            buffer_size: 8192,
        }
    }
}

/// Where an input comes from; `-` on the command line means stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl FromStr for InputSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(s))
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Snippet files hold either a bare array or the API list envelope `{"snippets": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum SnippetFile {
    List(Vec<Snippet>),
    Envelope { snippets: Vec<Snippet> },
}

/// Async reader for text, snippet and JSON inputs
pub struct InputReader {
    config: ReaderConfig,
}

impl InputReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a whole input as UTF-8 text, byte for byte (line endings untouched)
    pub async fn read_text(&self, source: &InputSource) -> Result<String> {
        let start_time = std::time::Instant::now();
        debug!("Starting async read of {}", source);

        let bytes = match source {
            InputSource::Stdin => self.read_limited(tokio::io::stdin(), source).await?,
            InputSource::File(path) => {
                let file = File::open(path)
                    .await
                    .with_context(|| format!("Failed to open file {}", path.display()))?;
                self.read_limited(file, source).await?
            }
        };

        let text = String::from_utf8(bytes).map_err(|e| {
            anyhow::anyhow!(
                "UTF-8 decoding error in {} at byte {}",
                source,
                e.utf8_error().valid_up_to()
            )
        })?;

        info!(
            "Read {}: {} bytes in {}ms",
            source,
            text.len(),
            start_time.elapsed().as_millis()
        );
        Ok(text)
    }

    /// Read and parse a snippet collection
    pub async fn read_snippets(&self, source: &InputSource) -> Result<Vec<Snippet>> {
        let content = self.read_text(source).await?;
        let snippets = parse_snippets(&content)
            .with_context(|| format!("Invalid snippet file {}", source))?;
        if snippets.is_empty() {
            warn!("Snippet file {} contains no snippets", source);
        }
        Ok(snippets)
    }

    /// Read and parse arbitrary JSON
    pub async fn read_json(&self, source: &InputSource) -> Result<Value> {
        let content = self.read_text(source).await?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", source))
    }

    async fn read_limited<R: AsyncRead + Unpin>(
        &self,
        reader: R,
        source: &InputSource,
    ) -> Result<Vec<u8>> {
        let limit = self.config.max_input_bytes;
        // One byte past the limit tells "exactly at limit" apart from "too large"
        let mut limited =
            BufReader::with_capacity(self.config.buffer_size, reader).take(limit as u64 + 1);
        let mut bytes = Vec::new();
        limited
            .read_to_end(&mut bytes)
            .await
            .with_context(|| format!("Failed to read {}", source))?;

        if bytes.len() > limit {
            bail!("Input {} exceeds the {} byte limit", source, limit);
        }
        Ok(bytes)
    }
}

impl Default for InputReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

/// Parse snippets from JSON text (bare array or `{"snippets": [...]}`)
pub fn parse_snippets(json: &str) -> Result<Vec<Snippet>> {
    let file: SnippetFile = serde_json::from_str(json)
        .context("Expected a snippet array or an object with a \"snippets\" array")?;
    Ok(match file {
        SnippetFile::List(snippets) => snippets,
        SnippetFile::Envelope { snippets } => snippets,
    })
}

/// Convenience function for reading a single file with default configuration
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let source = InputSource::File(file_path.as_ref().to_path_buf());
    InputReader::default().read_text(&source).await
}
