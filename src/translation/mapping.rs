/*!
 * Mapping translated sentences back onto cue time slots.
 *
 * A translated sentence is spread over the cues it was built from by word
 * count: every slot gets the same number of words, and any remainder goes
 * one extra word each to the earliest slots.
 */

use log::{debug, warn};

use crate::errors::TranslationWarning;
use super::document::TaggedDocument;
use super::sentences::SentenceUnit;

/// One translated cue, carrying the timing of an original cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCue {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Output cues plus the degradations met while producing them
#[derive(Debug, Default)]
pub struct MappingResult {
    pub cues: Vec<OutputCue>,
    pub warnings: Vec<TranslationWarning>,
}

/// Split `text` into `n_chunks` word runs, front-loading the remainder.
///
/// `n_chunks == 0` yields nothing and `n_chunks == 1` yields the text as is.
pub fn split_into_chunks(text: &str, n_chunks: usize) -> Vec<String> {
    match n_chunks {
        0 => return Vec::new(),
        1 => return vec![text.to_string()],
        _ => {}
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let base = words.len() / n_chunks;
    let remainder = words.len() % n_chunks;

    let mut chunks = Vec::with_capacity(n_chunks);
    let mut start = 0;
    for i in 0..n_chunks {
        let size = base + usize::from(i < remainder);
        chunks.push(words[start..start + size].join(" "));
        start += size;
    }

    chunks
}

/// Redistributes translated sentences over their original cue slots
pub struct ResponseMapper;

impl ResponseMapper {
    /// Map every sentence, in order, to output cues.
    ///
    /// Sentences without a usable translation contribute nothing and are
    /// reported as `MissingTranslationFor`.
    pub fn map(sentences: &[SentenceUnit], translated: &TaggedDocument) -> MappingResult {
        let mut result = MappingResult::default();

        for sentence in sentences {
            let Some(id) = sentence.id() else {
                continue;
            };

            let full_text = match translated.get(id).map(str::trim) {
                Some(text) if !text.is_empty() => text,
                _ => {
                    let warning = TranslationWarning::MissingTranslationFor(id);
                    warn!("{}", warning);
                    result.warnings.push(warning);
                    continue;
                }
            };

            let slots = sentence.slot_count();
            let mut chunks = split_into_chunks(full_text, slots);
            if chunks.len() != slots {
                debug!("Chunk split for sentence {} produced {} of {} slots, repeating full text", id, chunks.len(), slots);
                chunks = vec![full_text.to_string(); slots];
            }

            for (i, chunk) in chunks.into_iter().enumerate() {
                let (start_ms, end_ms) = sentence
                    .cue_timestamps
                    .get(i)
                    .or_else(|| sentence.cue_timestamps.first())
                    .copied()
                    .unwrap_or_default();

                result.cues.push(OutputCue {
                    text: chunk,
                    start_ms,
                    end_ms,
                });
            }
        }

        result
    }
}
