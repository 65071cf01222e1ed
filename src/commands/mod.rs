//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod locate;
pub mod practice;
pub mod segments;

use std::path::{Path, PathBuf};

use segtype::subtitles::DirectorySource;
use segtype::Config;

/// Turn a `MEDIA` argument into a caption source and the id to load.
///
/// A path to an existing file (or anything ending in `.json`) is read
/// directly; anything else is a media id looked up in `--dir`, then in the
/// configured captions directory.
pub fn resolve_media(media: &str, dir: Option<&Path>, config: &Config) -> (DirectorySource, String) {
    let path = Path::new(media);
    let is_file = path.extension().is_some_and(|ext| ext == "json") || path.is_file();
    if is_file {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            return (DirectorySource::new(parent), stem.to_string());
        }
    }

    let dir = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.subtitles_dir());
    (DirectorySource::new(dir), media.to_string())
}
