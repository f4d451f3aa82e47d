use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::language_utils;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: `<stem>.<lang>.srt` inside output_dir
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();
        let output_filename = format!("{}.{}.srt", stem.to_string_lossy(), target_language.to_lowercase());
        output_dir.as_ref().join(output_filename)
    }

    /// Whether the path looks like an SRT file
    pub fn is_subtitle_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"))
    }

    /// Find SRT files under a directory, sorted for stable processing order.
    ///
    /// Files that already look like our own output (`name.<lang>.srt` for one of
    /// `skip_languages`, in any ISO 639 form) are left out so reruns do not
    /// translate translations.
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P, skip_languages: &[String]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !Self::is_subtitle_file(path) {
                continue;
            }

            let is_output = path
                .file_stem()
                .and_then(|stem| Path::new(stem).extension())
                .is_some_and(|lang| {
                    let lang = lang.to_string_lossy();
                    skip_languages
                        .iter()
                        .any(|skip| skip.eq_ignore_ascii_case(&lang) || language_utils::language_codes_match(skip, &lang))
                });

            if !is_output {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
