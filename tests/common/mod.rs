/*!
 * Common test utilities for the subsentence test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use subsentence::subtitle_processor::Cue;

// Re-export the scripted providers module
pub mod mock_providers;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample SRT with one sentence split over two cues
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:03,000
This is a test

2
00:00:03,500 --> 00:00:05,000
subtitle file.

3
00:00:06,000 --> 00:00:08,000
It works!
";

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Builds cues one second apart from plain texts, indexed from 1
pub fn cues_from_texts(texts: &[&str]) -> Vec<Cue> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let start = i as u64 * 1000;
            Cue::new(i + 1, start, start + 900, *text)
        })
        .collect()
}

/// Initializes env_logger once so `log` output shows with `--nocapture`
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
