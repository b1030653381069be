/*!
 * Tests for subtitle processing functionality
 */

use std::fmt::Write;
use anyhow::Result;
use srtrans::subtitle_processor::{SubtitleEntry, SubtitleCollection};
use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

/// Test timestamp parsing rejects malformed input
#[test]
fn test_timestamp_parsing_withInvalidComponents_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("00:61:00,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("00:00:61,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("not a timestamp").is_err());
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle".to_string());
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert!(output.contains("1"));
    assert!(output.contains("00:00:05,000 --> 00:00:10,000"));
    assert!(output.contains("Test subtitle"));
}

/// Test entry validation rejects inverted time ranges and empty text
#[test]
fn test_new_validated_withBadInput_shouldFail() {
    assert!(SubtitleEntry::new_validated(1, 5000, 4000, "text".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 1000, 2000, "   ".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 1000, 2000, "ok".to_string()).is_ok());
}

/// Test parsing a well-formed SRT document
#[test]
fn test_parse_srt_string_withValidContent_shouldParseAllEntries() {
    let entries = SubtitleCollection::parse_srt_string(common::SAMPLE_SRT).unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[0].start_time_ms, 1000);
    assert_eq!(entries[0].end_time_ms, 4000);
    assert_eq!(entries[0].text, "This is a test subtitle.");
    assert_eq!(entries[2].text, "For testing purposes.");
}

/// Test multi-line subtitle text is preserved
#[test]
fn test_parse_srt_string_withMultilineText_shouldJoinWithNewline() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst line\nSecond line\n";
    let entries = SubtitleCollection::parse_srt_string(content).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "First line\nSecond line");
}

/// Test entries are renumbered sequentially after parsing
#[test]
fn test_parse_srt_string_withGappyNumbering_shouldRenumber() {
    let content = "\
5
00:00:01,000 --> 00:00:02,000
First

9
00:00:03,000 --> 00:00:04,000
Second
";
    let entries = SubtitleCollection::parse_srt_string(content).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[1].seq_num, 2);
}

/// Test unparsable content is an error
#[test]
fn test_parse_srt_string_withGarbage_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("not an srt file at all").is_err());
    assert!(SubtitleCollection::parse_srt_string("").is_err());
}

/// Test writing and re-loading preserves entries
#[test]
fn test_write_to_srt_thenLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let path = common::create_test_subtitle(&dir, "sample.srt")?;

    let collection = SubtitleCollection::load_from_file(&path)?;
    assert_eq!(collection.entries.len(), 3);

    let out_path = dir.join("rewritten.srt");
    collection.write_to_srt(&out_path)?;

    let reloaded = SubtitleCollection::load_from_file(&out_path)?;
    assert_eq!(reloaded.entries.len(), collection.entries.len());
    for (original, copy) in collection.entries.iter().zip(reloaded.entries.iter()) {
        assert_eq!(original.seq_num, copy.seq_num);
        assert_eq!(original.start_time_ms, copy.start_time_ms);
        assert_eq!(original.end_time_ms, copy.end_time_ms);
        assert_eq!(original.text, copy.text);
    }

    Ok(())
}

/// Test loading a missing file is an error
#[test]
fn test_load_from_file_withMissingFile_shouldFail() {
    assert!(SubtitleCollection::load_from_file("/nonexistent/missing.srt").is_err());
}
