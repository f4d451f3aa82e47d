/*!
 * Sentence-level subtitle translation engine.
 *
 * - `sentences`: Rebuilding sentences from cues
 * - `document`: Tagged request/response document
 * - `mapping`: Spreading translated sentences back over cue slots
 * - `core`: Pass orchestration against a provider
 */

// Re-export main types for easier usage
pub use self::core::{TranslationOutcome, TranslationService};
pub use self::document::{DocumentEntry, TaggedDocument};
pub use self::mapping::{split_into_chunks, MappingResult, OutputCue, ResponseMapper};
pub use self::sentences::{SentenceAggregator, SentenceUnit};

// Submodules
pub mod core;
pub mod document;
pub mod mapping;
pub mod sentences;
