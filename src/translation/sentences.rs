/*!
 * Sentence reconstruction from subtitle cues.
 *
 * Cues are display-sized fragments and frequently cut a sentence in half.
 * The aggregator glues consecutive cues back together until it sees a
 * sentence end, remembering which cues (and which time slots) each
 * sentence was made from so the translation can be spread back over them.
 */

use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;

use crate::subtitle_processor::Cue;

/// Abbreviations whose trailing period does not end a sentence
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "etc.", "e.g.", "i.e.", "vs.", "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr.", "Co.",
        "Ltd.", "Inc.", "St.", "Ave.", "Ph.D.", "U.S.", "U.K.", "a.m.", "p.m.", "vol.", "rev.",
        "no.", "p.", "pp.",
    ]
    .into_iter()
    .collect()
});

/// Markers that close a sentence
const SENTENCE_ENDS: [&str; 5] = [".", "!", "?", "...", "…"];

/// Markers that open a continuation line
const ELLIPSIS_MARKERS: [&str; 2] = ["...", "…"];

/// A sentence rebuilt from one or more consecutive cues
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentenceUnit {
    /// Whitespace-normalized sentence text
    pub text: String,

    /// Indices of the member cues, in order
    pub cue_indices: Vec<usize>,

    /// (start, end) in ms of each member cue, parallel to `cue_indices`
    pub cue_timestamps: Vec<(u64, u64)>,
}

impl SentenceUnit {
    /// Identifier used in the tagged document: the first member cue's index
    pub fn id(&self) -> Option<usize> {
        self.cue_indices.first().copied()
    }

    /// Number of cue slots the sentence covers
    pub fn slot_count(&self) -> usize {
        self.cue_indices.len()
    }

    fn is_empty(&self) -> bool {
        self.cue_indices.is_empty()
    }
}

/// Collapse every whitespace run into a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stateless cue-to-sentence grouping
pub struct SentenceAggregator;

impl SentenceAggregator {
    /// Group cues into sentence units, covering each non-blank cue once and in order
    pub fn aggregate(cues: &[Cue]) -> Vec<SentenceUnit> {
        let mut sentences = Vec::new();
        let mut current = SentenceUnit::default();

        for cue in cues {
            let text = cue.text.trim();
            if text.is_empty() {
                continue;
            }

            current.cue_indices.push(cue.index);
            current.cue_timestamps.push((cue.start_ms, cue.end_ms));

            if !current.text.is_empty() && starts_with_ellipsis(text) {
                current.text.truncate(current.text.trim_end().len());
                current.text.push_str("...");
            }

            current.text.push(' ');
            current.text.push_str(text);
            current.text = normalize_whitespace(&current.text);

            if Self::is_sentence_boundary(text) {
                sentences.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() && !current.text.is_empty() {
            sentences.push(current);
        }

        debug!("Aggregated {} cues into {} sentences", cues.len(), sentences.len());
        sentences
    }

    /// Whether a cue's trimmed text closes the sentence it belongs to
    pub fn is_sentence_boundary(text: &str) -> bool {
        let text = text.trim();
        let ends_with_marker = SENTENCE_ENDS.iter().any(|end| text.ends_with(end));
        if !ends_with_marker || ends_with_abbreviation(text) {
            return false;
        }

        // An odd quote count means the quotation is still open
        text.matches('"').count() % 2 == 0
    }
}

fn starts_with_ellipsis(text: &str) -> bool {
    ELLIPSIS_MARKERS.iter().any(|marker| text.starts_with(marker))
}

fn ends_with_abbreviation(text: &str) -> bool {
    ABBREVIATIONS.iter().any(|abbr| text.ends_with(abbr))
}
