/*!
 * Tests for SRT parsing, validation and writing
 */

use anyhow::Result;
use subsentence::errors::SubtitleError;
use subsentence::subtitle_processor::{Cue, SubtitleCollection};
use subsentence::translation::OutputCue;
use crate::common;

#[test]
fn test_parseTimestamp_withCommaAndDot_shouldAgree() -> Result<()> {
    assert_eq!(Cue::parse_timestamp("01:02:03,456")?, 3_723_456);
    assert_eq!(Cue::parse_timestamp("01:02:03.456")?, 3_723_456);
    Ok(())
}

#[test]
fn test_parseTimestamp_withSixtySeconds_shouldFail() {
    assert!(Cue::parse_timestamp("00:00:60,000").is_err());
    assert!(Cue::parse_timestamp("00:00").is_err());
}

#[test]
fn test_formatTimestamp_shouldPadFields() {
    assert_eq!(Cue::format_timestamp(0), "00:00:00,000");
    assert_eq!(Cue::format_timestamp(3_723_456), "01:02:03,456");
}

#[test]
fn test_parseSrtString_withSample_shouldReadAllCues() -> Result<()> {
    let cues = SubtitleCollection::parse_srt_string(common::SAMPLE_SRT)?;

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0], Cue::new(1, 1000, 3000, "This is a test"));
    assert_eq!(cues[1].start_ms, 3500);
    assert_eq!(cues[2].text, "It works!");
    Ok(())
}

#[test]
fn test_parseSrtString_withBomAndCrlf_shouldParse() -> Result<()> {
    let content = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nHi.\r\n\r\n";
    let cues = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(cues, vec![Cue::new(1, 1000, 2000, "Hi.")]);
    Ok(())
}

#[test]
fn test_parseSrtString_withMultilineText_shouldJoinWithNewline() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nfirst line\nsecond line\n";
    let cues = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(cues[0].text, "first line\nsecond line");
    Ok(())
}

#[test]
fn test_parseSrtString_withEmptyContent_shouldReturnEmptySource() {
    let result = SubtitleCollection::parse_srt_string("");
    assert!(matches!(result, Err(SubtitleError::EmptySource)));
}

#[test]
fn test_parseSrtString_withZeroIndex_shouldReturnMalformed() {
    let content = "0\n00:00:01,000 --> 00:00:02,000\nZero.\n";
    let result = SubtitleCollection::parse_srt_string(content);
    assert!(matches!(result, Err(SubtitleError::MalformedSource { line: 1, .. })));
}

#[test]
fn test_parseSrtString_withMissingTiming_shouldReportLine() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nOk.\n\n2\nnot a timing line\n";
    match SubtitleCollection::parse_srt_string(content) {
        Err(SubtitleError::MalformedSource { line, reason }) => {
            assert_eq!(line, 6);
            assert!(reason.contains("invalid timing line"));
        }
        other => panic!("Expected MalformedSource, got {:?}", other),
    }
}

#[test]
fn test_parseTimestamp_withOverflowingHours_shouldFail() {
    assert!(Cue::parse_timestamp("9999999999999999:00:00,000").is_err());
    assert!(Cue::parse_timestamp("99999999999999999999999:00:00,000").is_err());
    assert_eq!(Cue::parse_timestamp("5124095576:00:00,000").ok(), Some(5_124_095_576 * 3_600_000));
}

#[test]
fn test_parseSrtString_withOverlappingCues_shouldStillParse() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:05,000\nA\n\n2\n00:00:04,000 --> 00:00:06,000\nB\n";
    let cues = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(cues.len(), 2);
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldReturnIoError() {
    let result = SubtitleCollection::load("/definitely/not/here.srt");
    assert!(matches!(result, Err(SubtitleError::Io(_))));
}

#[test]
fn test_fromOutputCues_shouldRenumberFromOne() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("out.srt");
    let cues = vec![
        OutputCue { text: "Bonjour".to_string(), start_ms: 1000, end_ms: 2000 },
        OutputCue { text: "le monde".to_string(), start_ms: 2000, end_ms: 3000 },
    ];

    let collection = SubtitleCollection::from_output_cues(output.clone(), &cues);
    collection.write_to_srt(&output)?;

    let written = std::fs::read_to_string(&output)?;
    assert!(written.starts_with("1\n00:00:01,000 --> 00:00:02,000\nBonjour\n\n2\n"));

    let reparsed = SubtitleCollection::load(&output)?;
    assert_eq!(reparsed.entries.len(), 2);
    assert_eq!(reparsed.entries[1].text, "le monde");
    Ok(())
}
