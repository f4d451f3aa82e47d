use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::translation::OutputCue;

// @module: Cue stream loading, validation and SRT output

// @const: Cue timing line, "," or "." before the milliseconds
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d+:\d{2}:\d{2}[,.]\d{3})")
        .expect("timing regex is valid")
});

// @struct: Single timed cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Source index, positive and increasing
    pub index: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cue text, lines joined with '\n'
    pub text: String,
}

impl Cue {
    pub fn new(index: usize, start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Cue {
            index,
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Parse a `HH:MM:SS,mmm` (or `HH:MM:SS.mmm`) timestamp to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow::anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow::anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {}", timestamp))
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_ms)
    }

    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_ms)
    }

    /// True when the text is blank after trimming
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered cue stream read from one subtitle source
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Where the cues came from
    pub source_file: PathBuf,

    /// Cues in source order
    pub entries: Vec<Cue>,
}

impl SubtitleCollection {
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Load and validate a subtitle file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let entries = Self::parse_srt_string(&content)?;

        debug!("Loaded {} cues from {}", entries.len(), path.display());

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Build a writable collection from a pass result, renumbering from 1
    pub fn from_output_cues(source_file: PathBuf, cues: &[OutputCue]) -> Self {
        let entries = cues
            .iter()
            .enumerate()
            .map(|(i, cue)| Cue::new(i + 1, cue.start_ms, cue.end_ms, cue.text.clone()))
            .collect();

        SubtitleCollection { source_file, entries }
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Parse SRT content into an ordered cue stream.
    ///
    /// Blank-text cues are kept. Fails with `EmptySource` when no block is found
    /// and `MalformedSource` when a block lacks a valid index or timing line, when
    /// a cue ends before it starts, or when indices do not increase.
    pub fn parse_srt_string(content: &str) -> Result<Vec<Cue>, SubtitleError> {
        let content = content.trim_start_matches('\u{feff}');

        let mut entries: Vec<Cue> = Vec::new();
        let mut block: Vec<(usize, &str)> = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if !block.is_empty() {
                    entries.push(Self::parse_block(&block, entries.last())?);
                    block.clear();
                }
                continue;
            }
            block.push((i + 1, line));
        }

        if !block.is_empty() {
            entries.push(Self::parse_block(&block, entries.last())?);
        }

        if entries.is_empty() {
            return Err(SubtitleError::EmptySource);
        }

        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_ms > pair[1].start_ms)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        Ok(entries)
    }

    fn parse_block(block: &[(usize, &str)], previous: Option<&Cue>) -> Result<Cue, SubtitleError> {
        let (index_line, index_text) = block[0];
        let index: usize = index_text.trim().parse().map_err(|_| SubtitleError::MalformedSource {
            line: index_line,
            reason: format!("expected a cue index, found '{}'", index_text.trim()),
        })?;

        if index == 0 {
            return Err(SubtitleError::MalformedSource {
                line: index_line,
                reason: "cue index must be positive".to_string(),
            });
        }

        if let Some(prev) = previous {
            if index <= prev.index {
                return Err(SubtitleError::MalformedSource {
                    line: index_line,
                    reason: format!("cue index {} does not follow {}", index, prev.index),
                });
            }
        }

        let Some(&(timing_line, timing_text)) = block.get(1) else {
            return Err(SubtitleError::MalformedSource {
                line: index_line,
                reason: format!("cue {} has no timing line", index),
            });
        };

        let caps = TIMING_REGEX.captures(timing_text.trim()).ok_or_else(|| {
            SubtitleError::MalformedSource {
                line: timing_line,
                reason: format!("invalid timing line '{}'", timing_text.trim()),
            }
        })?;

        let timestamp = |group: usize| -> Result<u64, SubtitleError> {
            Cue::parse_timestamp(&caps[group]).map_err(|e| SubtitleError::MalformedSource {
                line: timing_line,
                reason: format!("{:#}", e),
            })
        };
        let start_ms = timestamp(1)?;
        let end_ms = timestamp(2)?;

        if start_ms > end_ms {
            return Err(SubtitleError::MalformedSource {
                line: timing_line,
                reason: format!("cue {} ends before it starts", index),
            });
        }

        let text = block[2..]
            .iter()
            .map(|(_, line)| line.trim())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Cue::new(index, start_ms, end_ms, text))
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
