//! Caption files on disk through `DirectorySource`

use super::helpers::{caption_dir, HELLO_WORLD_JSON};
use segtype::subtitles::{DirectorySource, SourceError, SubtitleSource};
use segtype::Segment;

#[test]
fn directory_source_loads_and_sorts_captions() {
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);
    let source = DirectorySource::new(dir.path());

    let segments = source.load("talk");

    assert_eq!(segments.len(), 2);
    assert_eq!(segments.get(0), Some(&Segment::new(0, 2000, "hello")));
    assert_eq!(segments.get(1), Some(&Segment::new(2000, 3000, "world")));
    assert_eq!(segments.total_ms(), 5000);
}

#[test]
fn missing_file_is_not_found_and_loads_empty() {
    let dir = caption_dir(&[]);
    let source = DirectorySource::new(dir.path());

    assert!(matches!(
        source.fetch("nope"),
        Err(SourceError::NotFound { .. })
    ));
    assert!(source.load("nope").is_empty());
}

#[test]
fn malformed_file_loads_empty() {
    let dir = caption_dir(&[("broken", "{ not json")]);
    let source = DirectorySource::new(dir.path());

    assert!(matches!(source.fetch("broken"), Err(SourceError::Parse(_))));
    assert!(source.load("broken").is_empty());
}

#[test]
fn media_id_cannot_escape_directory() {
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);
    let source = DirectorySource::new(dir.path().join("sub"));

    assert!(matches!(
        source.fetch("../talk"),
        Err(SourceError::InvalidMediaId(_))
    ));
}
