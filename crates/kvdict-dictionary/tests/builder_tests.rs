//! Integration tests for kvdict-dictionary
//!
//! These tests build dictionaries from real files on disk.

use kvdict_dictionary::{DictionaryBuilder, DictionaryError, FileSource, LineSource, Lines};
use kvdict_domain::DictionaryEntry;
use std::fs;
use std::io;

#[test]
fn test_build_from_file_with_inline_patch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("countries.txt"),
        "ES:Spain\nFR:France\nDE:Germany\n# not a comment, just malformed\n",
    )
    .unwrap();

    let file = FileSource::in_directory(dir.path(), "countries.txt");
    let inline = vec![DictionaryEntry::new("de", "Deutschland")];

    let built = DictionaryBuilder::new(true)
        .build(Some(&file), Some(&inline))
        .unwrap();

    assert_eq!(built.dictionary.len(), 3);
    assert_eq!(built.dictionary.lookup("es"), Some("Spain"));
    assert_eq!(built.dictionary.lookup("De"), Some("Deutschland"));
    assert_eq!(built.report.malformed_lines, 1);
    assert_eq!(built.report.overridden_entries, 1);
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileSource::in_directory(dir.path(), "nope.txt");

    let err = DictionaryBuilder::new(false)
        .build(Some(&file), None)
        .unwrap_err();

    match &err {
        DictionaryError::Open { error, .. } => assert_eq!(error.kind(), io::ErrorKind::NotFound),
        other => panic!("Expected Open error, got {:?}", other),
    }
    assert!(err.source_name().ends_with("nope.txt"));
}

#[test]
fn test_invalid_utf8_is_fatal_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"ok:1\ncaf\xe9:coffee\n").unwrap();

    let err = DictionaryBuilder::new(false)
        .build(Some(&FileSource::new(&path)), None)
        .unwrap_err();

    match err {
        DictionaryError::Read { line, .. } => assert_eq!(line, 2),
        other => panic!("Expected Read error, got {:?}", other),
    }
}

/// Source whose reads fail after the first line
struct FlakySource;

impl LineSource for FlakySource {
    fn name(&self) -> &str {
        "flaky"
    }

    fn open(&self) -> io::Result<Lines<'_>> {
        let lines = vec![
            Ok("a:1".to_string()),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection reset")),
        ];
        Ok(Box::new(lines.into_iter()))
    }
}

#[test]
fn test_read_failure_mid_stream_aborts_build() {
    let err = DictionaryBuilder::new(false)
        .build(Some(&FlakySource), None)
        .unwrap_err();
    assert_eq!(err.source_name(), "flaky");
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_rebuilding_same_sources_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("d.txt"), "A:1\na:2\nB:3\nb:4\nc:5\n").unwrap();
    let file = FileSource::in_directory(dir.path(), "d.txt");

    let inline = vec![
        DictionaryEntry::new("C", "six"),
        DictionaryEntry::new("c", "seven"),
    ];

    let builder = DictionaryBuilder::new(true);
    let first = builder.build(Some(&file), Some(&inline)).unwrap();
    let second = builder.build(Some(&file), Some(&inline)).unwrap();

    assert_eq!(first.dictionary, second.dictionary);
    assert_eq!(first.report, second.report);
    // Inline order: "C" then "c", so the lowercase spelling wins
    assert_eq!(first.dictionary.lookup("c"), Some("seven"));
}

#[test]
fn test_carriage_return_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mac.txt"), "a:1\rb:2\r").unwrap();

    let built = DictionaryBuilder::new(false)
        .build(Some(&FileSource::in_directory(dir.path(), "mac.txt")), None)
        .unwrap();

    assert_eq!(built.dictionary.len(), 2);
    assert_eq!(built.dictionary.lookup("a"), Some("1"));
    assert_eq!(built.dictionary.lookup("b"), Some("2"));
    assert_eq!(built.report.malformed_lines, 0);
}

#[test]
fn test_mixed_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mixed.txt"), "a:1\r\nb:2\nc:3\rd:4").unwrap();

    let built = DictionaryBuilder::new(false)
        .build(Some(&FileSource::in_directory(dir.path(), "mixed.txt")), None)
        .unwrap();

    assert_eq!(built.report.file_entries, 4);
    assert_eq!(built.dictionary.lookup("c"), Some("3"));
    assert_eq!(built.dictionary.lookup("d"), Some("4"));
}
