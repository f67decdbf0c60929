// Integration test utilities and common code
// WHY: Centralized fixtures keep the CLI and reader tests on the same file layout

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Story text used across integration tests
pub const STORY: &str = "Había una vez un pueblo. La panadera abría la puerta cada mañana!\n\
¿Dónde está la posada? Junto al río.";

/// Snippets matching `STORY`, in the API list envelope
pub const STORY_SNIPPETS: &str = r#"{
  "snippets": [
    {
      "id": 1,
      "original_text": "la puerta",
      "translated_text": "the door",
      "source_language": "es",
      "target_language": "en"
    },
    {"id": 2, "original_text": "puerta"},
    {"id": 3, "original_text": "Junto al río"},
    {"id": "local-4", "originalText": "LA POSADA"}
  ],
  "total": 4
}"#;

/// Test fixture helper for creating temporary input files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a file relative to the fixture root
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Story text and its snippet file
    pub fn create_story(&self) -> (PathBuf, PathBuf) {
        (
            self.create_file("story.txt", STORY),
            self.create_file("snippets.json", STORY_SNIPPETS),
        )
    }
}

/// Run the phrasemark binary with the given arguments
pub fn run_phrasemark<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_phrasemark"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run phrasemark")
}

/// Parse stdout of a successful run as JSON
pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "phrasemark failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}
