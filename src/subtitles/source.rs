//! Subtitle retrieval.
//!
//! A `SubtitleSource` turns a media identifier into segments. Retrieval
//! failures never reach the controller: `load` logs them and returns an
//! empty list, which is a valid navigate-to-nothing state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::segment::{Segment, SegmentList};

/// Errors that can occur while fetching captions.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Caption file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid media id: {0:?}")]
    InvalidMediaId(String),

    #[error("Failed to read captions: {0}")]
    Read(#[from] std::io::Error),

    #[error("Malformed caption data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can retrieve the captions for a media identifier.
pub trait SubtitleSource: Send {
    /// Fetch raw segments, surfacing the failure reason.
    fn fetch(&self, media_id: &str) -> Result<Vec<Segment>, SourceError>;

    /// Fetch and sort segments. Any failure yields an empty list.
    fn load(&self, media_id: &str) -> SegmentList {
        match self.fetch(media_id) {
            Ok(segments) => {
                let list = SegmentList::new(segments);
                tracing::info!(media_id, count = list.len(), "loaded captions");
                list
            }
            Err(e) => {
                tracing::warn!(media_id, error = %e, "caption retrieval failed");
                SegmentList::empty()
            }
        }
    }
}

/// One caption entry as delivered by the captions backend.
///
/// Offsets and durations are milliseconds and may be fractional.
#[derive(Debug, Deserialize)]
struct RawCaption {
    offset: f64,
    duration: f64,
    #[serde(default)]
    text: String,
}

/// Parse the captions wire format: `[{"offset": ms, "duration": ms, "text": ".."}]`.
///
/// Entries with a negative offset or a non-positive duration are skipped.
/// The result keeps the delivered order; `SegmentList::new` sorts it.
pub fn parse_captions(json: &str) -> Result<Vec<Segment>, SourceError> {
    let raw: Vec<RawCaption> = serde_json::from_str(json)?;
    let total = raw.len();

    let segments: Vec<Segment> = raw
        .into_iter()
        .filter_map(|caption| {
            let start = caption.offset.round();
            let duration = caption.duration.round();
            if !start.is_finite() || !duration.is_finite() || start < 0.0 || duration <= 0.0 {
                return None;
            }
            Some(Segment::new(start as u64, duration as u64, caption.text))
        })
        .collect();

    if segments.len() != total {
        tracing::debug!(skipped = total - segments.len(), "skipped invalid captions");
    }

    Ok(segments)
}

/// Reads `<dir>/<media_id>.json` caption files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the caption file for `media_id`.
    ///
    /// Rejects ids that would escape the directory.
    pub fn path_for(&self, media_id: &str) -> Result<PathBuf, SourceError> {
        let id = media_id.trim();
        if id.is_empty() || id == "." || id == ".." || id.contains(|c: char| c == '/' || c == '\\') {
            return Err(SourceError::InvalidMediaId(media_id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

impl SubtitleSource for DirectorySource {
    fn fetch(&self, media_id: &str) -> Result<Vec<Segment>, SourceError> {
        let path = self.path_for(media_id)?;
        if !path.is_file() {
            return Err(SourceError::NotFound { path });
        }
        let content = fs::read_to_string(&path)?;
        parse_captions(&content)
    }
}
