/*!
 * Tests for transcript document parsing
 */

use srtcut::errors::RunWarning;
use srtcut::transcript::{format_timestamp, parse_transcript};

use crate::common;

#[test]
fn test_parse_withSampleDocument_shouldYieldOrderedBlocks() {
    let (blocks, warnings) = parse_transcript(common::ORIGINAL_SRT);

    assert_eq!(blocks.len(), 4);
    assert!(warnings.is_empty());
    let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["intro", "um filler", "body", "outro"]);
}

#[test]
fn test_parse_withMissingBlockNumbers_shouldAssignRunningCounter() {
    let doc = "00:00:00,000 --> 00:00:01,000\nfirst\n\n00:00:01,000 --> 00:00:02,000\nsecond\n";

    let (blocks, warnings) = parse_transcript(doc);

    assert_eq!(blocks.len(), 2);
    assert!(warnings.is_empty());
    assert_eq!(blocks[0].index, 1);
    assert_eq!(blocks[1].index, 2);
}

#[test]
fn test_parse_withDamagedBlankLines_shouldStillFindAllBlocks() {
    let doc = "1\n00:00:00,000 --> 00:00:01,000\nfirst\n\n\n   \n\n2\n00:00:01,000 --> 00:00:02,000\nsecond\n";

    let (blocks, _) = parse_transcript(doc);

    assert_eq!(blocks.len(), 2);
}

#[test]
fn test_parse_withEndBeforeStart_shouldWarnAndMarkUnparseable() {
    let doc = "1\n00:00:05,210 --> 00:00:03,000\nbackwards block\n";

    let (blocks, warnings) = parse_transcript(doc);

    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_unparseable());
    assert!(matches!(
        warnings[0],
        RunWarning::MalformedTimeRange { index: 1, .. }
    ));
    // The text itself survives for reporting
    assert_eq!(blocks[0].text, "backwards block");
}

#[test]
fn test_parse_withEntirelyMangledDocument_shouldNotPanic() {
    let doc = "total garbage\nno structure here\n\n-->\n\n42\n";

    let (blocks, warnings) = parse_transcript(doc);

    // Everything is recovered as unparseable blocks, nothing is lost
    assert!(!blocks.is_empty());
    assert_eq!(blocks.len(), warnings.len());
    assert!(blocks.iter().all(|b| b.is_unparseable()));
}

#[test]
fn test_parse_normalization_shouldStripCaseAndPunctuation() {
    let doc = "1\n00:00:00,000 --> 00:00:01,000\nHello,   World!\n";

    let (blocks, _) = parse_transcript(doc);

    assert_eq!(blocks[0].normalized, "hello world");
}

#[test]
fn test_formatTimestamp_shouldProduceSrtForm() {
    assert_eq!(format_timestamp(2.0), "00:00:02,000");
    assert_eq!(format_timestamp(3661.5), "01:01:01,500");
}

#[test]
fn test_block_display_shouldRenderSrtShape() {
    let (blocks, _) = parse_transcript(common::ORIGINAL_SRT);
    let rendered = blocks[1].to_string();

    assert!(rendered.contains("00:00:02,000 --> 00:00:04,000"));
    assert!(rendered.contains("um filler"));
}
