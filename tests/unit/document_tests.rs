/*!
 * Tests for the tagged request/response document
 */

use subsentence::translation::{SentenceAggregator, TaggedDocument};
use crate::common::cues_from_texts;

#[test]
fn test_toMarkup_fromAggregatedCues_shouldUseFirstCueIds() {
    let cues = cues_from_texts(&["One", "sentence.", "Two."]);
    let doc = TaggedDocument::from_sentences(&SentenceAggregator::aggregate(&cues));

    let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<subtitles>\n<subtitle id='1'>One sentence.</subtitle>\n<subtitle id='3'>Two.</subtitle>\n</subtitles>";
    assert_eq!(doc.to_markup(), expected);
    assert_eq!(doc.char_count(), "One sentence.".len() + "Two.".len());
}

#[test]
fn test_parse_withProviderStyleResponse_shouldAcceptVariants() {
    let response = r#"<?xml version="1.0" encoding="UTF-8"?>
<subtitles>
  <subtitle id="1">Une phrase.</subtitle>
  <subtitle id='3' />
  <subtitle id='7'>Caf&#233; &amp; th&#xE9;</subtitle>
</subtitles>"#;

    let doc = TaggedDocument::parse(response).unwrap();
    assert_eq!(doc.len(), 3);
    assert_eq!(doc.get(1), Some("Une phrase."));
    assert_eq!(doc.get(3), Some(""));
    assert_eq!(doc.get(7), Some("Café & thé"));
    assert_eq!(doc.get(2), None);
}

#[test]
fn test_parse_withoutDeclaration_shouldStillParse() {
    let doc = TaggedDocument::parse("<subtitles><subtitle id='2'>x</subtitle></subtitles>").unwrap();
    assert_eq!(doc.get(2), Some("x"));
}

#[test]
fn test_parse_withEmptyRoot_shouldYieldNoEntries() {
    let doc = TaggedDocument::parse("<subtitles>\n</subtitles>").unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_parse_withPlainText_shouldFail() {
    assert!(TaggedDocument::parse("Bonjour tout le monde").is_err());
}

#[test]
fn test_parse_withUnclosedRoot_shouldFail() {
    assert!(TaggedDocument::parse("<subtitles><subtitle id='1'>a</subtitle>").is_err());
}

#[test]
fn test_parse_withInlineMarkup_shouldKeepEveryEntry() {
    let doc = TaggedDocument::parse(
        "<subtitles><subtitle id='1'>Hola <b>mundo</b></subtitle><subtitle id='2'>Adios.</subtitle></subtitles>",
    )
    .unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get(1), Some("Hola mundo"));
    assert_eq!(doc.get(2), Some("Adios."));
}

#[test]
fn test_parse_withLineBreakElement_shouldSeparateWords() {
    let doc = TaggedDocument::parse("<subtitles><subtitle id='4'>A<br/>B</subtitle></subtitles>").unwrap();
    assert_eq!(doc.get(4), Some("A B"));
}

#[test]
fn test_parse_withOnlyChildElement_shouldYieldEmptyText() {
    let doc = TaggedDocument::parse("<subtitles><subtitle id='1'><i></i></subtitle></subtitles>").unwrap();
    assert_eq!(doc.get(1), Some(""));
}

#[test]
fn test_parse_withComments_shouldIgnoreThem() {
    let doc = TaggedDocument::parse(
        "<!-- generated --><subtitles><!-- c --><subtitle id='1'>Un<!-- x -->.</subtitle>\n<!-- c2 -->\n<subtitle id='2'>Deux.</subtitle></subtitles>",
    )
    .unwrap();

    assert_eq!(doc.get(1), Some("Un."));
    assert_eq!(doc.get(2), Some("Deux."));
}

#[test]
fn test_parse_withNestedSubtitleElement_shouldFail() {
    let result = TaggedDocument::parse(
        "<subtitles><subtitle id='1'>a <subtitle id='2'>b</subtitle></subtitle></subtitles>",
    );
    assert!(result.is_err());
}

#[test]
fn test_parse_withUnterminatedEntity_shouldFail() {
    let result = TaggedDocument::parse("<subtitles><subtitle id='1'>fish &amp chips</subtitle></subtitles>");
    assert!(result.is_err());
}

#[test]
fn test_parse_withStrayText_shouldFail() {
    let result = TaggedDocument::parse("<subtitles>oops<subtitle id='1'>a</subtitle></subtitles>");
    let error = result.unwrap_err();
    assert!(error.reason.contains("unexpected content"));
}

#[test]
fn test_parse_withDuplicateIds_shouldFail() {
    let result = TaggedDocument::parse(
        "<subtitles><subtitle id='1'>a</subtitle><subtitle id='1'>b</subtitle></subtitles>",
    );
    assert!(result.unwrap_err().reason.contains("duplicate id 1"));
}

#[test]
fn test_parse_withUnknownEntity_shouldFail() {
    let result = TaggedDocument::parse("<subtitles><subtitle id='1'>&nbsp;</subtitle></subtitles>");
    assert!(result.is_err());
}
