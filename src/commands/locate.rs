//! `segtype locate`: which segment is active at a position

use std::path::Path;

use anyhow::Result;

use segtype::subtitles::{SegmentList, SubtitleSource};
use segtype::Config;

use super::resolve_media;

pub fn handle(media: &str, position_ms: u64, dir: Option<&Path>, config: &Config) -> Result<()> {
    let (source, media_id) = resolve_media(media, dir, config);
    let segments = source.load(&media_id);
    println!("{}", describe(&segments, position_ms));
    Ok(())
}

/// `"<index>\t<start>-<end>\t<text>"`, or `"no segment"` in a gap.
pub fn describe(segments: &SegmentList, position_ms: u64) -> String {
    match segments
        .locate(position_ms)
        .and_then(|i| segments.get(i).map(|s| (i, s)))
    {
        Some((index, segment)) => format!(
            "{}\t{}-{}\t{}",
            index,
            segment.start_ms,
            segment.end_ms(),
            segment.text
        ),
        None => "no segment".to_string(),
    }
}
