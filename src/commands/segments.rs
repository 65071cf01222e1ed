//! `segtype segments`: print the segment list a media id loads to

use std::path::Path;

use anyhow::Result;

use segtype::subtitles::{SegmentList, SubtitleSource};
use segtype::tui::current_theme;
use segtype::Config;

use super::resolve_media;

pub fn handle(media: &str, dir: Option<&Path>, json: bool, config: &Config) -> Result<()> {
    let (source, media_id) = resolve_media(media, dir, config);
    let segments = source.load(&media_id);

    if json {
        println!("{}", serde_json::to_string_pretty(segments.as_slice())?);
        return Ok(());
    }

    let theme = current_theme();
    if segments.is_empty() {
        println!("{}", theme.secondary_text("no segments"));
        return Ok(());
    }
    print!("{}", format_table(&segments));
    println!(
        "{}",
        theme.secondary_text(&format!("{} segments", segments.len()))
    );
    Ok(())
}

/// One line per segment: index, start and end in ms, text.
pub fn format_table(segments: &SegmentList) -> String {
    let width = segments.total_ms().to_string().len();
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:>w$} - {:>w$}  {}\n",
            i,
            segment.start_ms,
            segment.end_ms(),
            segment.text,
            w = width
        ));
    }
    out
}
