// WHY: --stats-out records what one CLI run did, for regression tracking across snippet sets

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::highlighter::HighlightStats;

/// Statistics for one CLI command run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Subcommand name
    pub command: String,
    /// Characters of input text processed
    pub chars_processed: u64,
    /// Snippets loaded from the snippet file
    pub snippets_loaded: u64,
    /// Spans produced by highlighting (0 for commands that do not highlight)
    pub spans_accepted: u64,
    /// Candidate matches dropped because a longer snippet already covered them
    pub overlaps_suppressed: u64,
    /// Sentences produced (1 or 0 for extract, any count for split)
    pub sentences_found: u64,
    /// Processing time in microseconds, excluding input loading
    pub processing_time_us: u64,
    /// Throughput in characters per second
    pub chars_per_sec: f64,
}

impl RunStats {
    pub fn new(command: &str, chars_processed: usize, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        Self {
            command: command.to_string(),
            chars_processed: chars_processed as u64,
            snippets_loaded: 0,
            spans_accepted: 0,
            overlaps_suppressed: 0,
            sentences_found: 0,
            processing_time_us: elapsed.as_micros() as u64,
            chars_per_sec: if secs > 0.0 { chars_processed as f64 / secs } else { 0.0 },
        }
    }

    pub fn with_highlight(mut self, snippets_loaded: usize, highlight: &HighlightStats) -> Self {
        self.snippets_loaded = snippets_loaded as u64;
        self.spans_accepted = highlight.spans_accepted as u64;
        self.overlaps_suppressed = highlight.overlaps_suppressed as u64;
        self
    }

    pub fn with_sentences(mut self, sentences_found: usize) -> Self {
        self.sentences_found = sentences_found as u64;
        self
    }

    /// Write as pretty JSON
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create stats directory {}", parent.display()))?;
        }
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write stats file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_throughput_zero_duration() {
        let stats = RunStats::new("split", 100, Duration::ZERO);
        assert_eq!(stats.chars_per_sec, 0.0);
        assert_eq!(stats.processing_time_us, 0);
    }

    #[test]
    fn test_with_highlight() {
        let highlight = HighlightStats {
            snippets_considered: 3,
            snippets_skipped: 0,
            candidates_found: 5,
            spans_accepted: 4,
            overlaps_suppressed: 1,
        };
        let stats =
            RunStats::new("highlight", 10, Duration::from_millis(2)).with_highlight(3, &highlight);
        assert_eq!(stats.snippets_loaded, 3);
        assert_eq!(stats.spans_accepted, 4);
        assert_eq!(stats.overlaps_suppressed, 1);
        assert!(stats.chars_per_sec > 0.0);
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("stats.json");
        let stats = RunStats::new("extract", 5, Duration::from_micros(10)).with_sentences(1);
        stats.write_to(&path).await.expect("Failed to write stats");

        let content = std::fs::read_to_string(&path).expect("Failed to read stats");
        let parsed: RunStats = serde_json::from_str(&content).expect("Invalid stats JSON");
        assert_eq!(parsed.command, "extract");
        assert_eq!(parsed.sentences_found, 1);
        assert_eq!(parsed.processing_time_us, 10);
    }
}
