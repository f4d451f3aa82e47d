/*!
 * Tests for spreading translations back over cue slots
 */

use subsentence::errors::TranslationWarning;
use subsentence::translation::{split_into_chunks, ResponseMapper, SentenceAggregator, TaggedDocument};
use crate::common::cues_from_texts;

#[test]
fn test_splitIntoChunks_withRemainder_shouldFrontLoad() {
    assert_eq!(split_into_chunks("a b c d e", 2), vec!["a b c", "d e"]);
    assert_eq!(split_into_chunks("a b c d e f g", 3), vec!["a b c", "d e", "f g"]);
}

#[test]
fn test_splitIntoChunks_withSingleChunk_shouldReturnTextVerbatim() {
    assert_eq!(split_into_chunks("  spaced   text ", 1), vec!["  spaced   text "]);
}

#[test]
fn test_splitIntoChunks_withZeroChunks_shouldReturnNothing() {
    assert!(split_into_chunks("a b", 0).is_empty());
}

#[test]
fn test_splitIntoChunks_withFewerWordsThanChunks_shouldPadWithEmpty() {
    assert_eq!(split_into_chunks("one two", 3), vec!["one", "two", ""]);
}

#[test]
fn test_splitIntoChunks_shouldPreserveWordOrder() {
    let text = "the quick brown fox jumps over the lazy dog";
    for n in 2..6 {
        let joined = split_into_chunks(text, n)
            .into_iter()
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(joined, text);
    }
}

#[test]
fn test_map_withMultiCueSentence_shouldSplitOverOriginalSlots() {
    let cues = cues_from_texts(&["Hello there,", "my friend."]);
    let sentences = SentenceAggregator::aggregate(&cues);
    let mut translated = TaggedDocument::default();
    translated.push(1, "Bonjour mon cher ami.");

    let result = ResponseMapper::map(&sentences, &translated);

    assert!(result.warnings.is_empty());
    assert_eq!(result.cues.len(), 2);
    assert_eq!(result.cues[0].text, "Bonjour mon");
    assert_eq!((result.cues[0].start_ms, result.cues[0].end_ms), (0, 900));
    assert_eq!(result.cues[1].text, "cher ami.");
    assert_eq!((result.cues[1].start_ms, result.cues[1].end_ms), (1000, 1900));
}

#[test]
fn test_map_withMissingEntry_shouldWarnAndSkipSentence() {
    let cues = cues_from_texts(&["One.", "Two."]);
    let sentences = SentenceAggregator::aggregate(&cues);
    let mut translated = TaggedDocument::default();
    translated.push(2, "Deux.");

    let result = ResponseMapper::map(&sentences, &translated);

    assert_eq!(result.cues.len(), 1);
    assert_eq!(result.cues[0].text, "Deux.");
    assert_eq!(result.warnings, vec![TranslationWarning::MissingTranslationFor(1)]);
}

#[test]
fn test_map_withWhitespaceOnlyEntry_shouldCountAsMissing() {
    let cues = cues_from_texts(&["One."]);
    let sentences = SentenceAggregator::aggregate(&cues);
    let mut translated = TaggedDocument::default();
    translated.push(1, "   ");

    let result = ResponseMapper::map(&sentences, &translated);

    assert!(result.cues.is_empty());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_map_withUnknownIdsInResponse_shouldIgnoreThem() {
    let cues = cues_from_texts(&["One."]);
    let sentences = SentenceAggregator::aggregate(&cues);
    let mut translated = TaggedDocument::default();
    translated.push(1, "Un.");
    translated.push(99, "Extra.");

    let result = ResponseMapper::map(&sentences, &translated);
    assert_eq!(result.cues.len(), 1);
}
