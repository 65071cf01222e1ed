//! Subtitle segments and their retrieval.
//!
//! - `segment`: `Segment` and the sorted, immutable `SegmentList`
//! - `source`: the `SubtitleSource` trait and the caption-file source
//! - `worker`: background loader thread feeding results back by generation

mod segment;
pub mod source;
pub mod worker;

pub use segment::{Segment, SegmentList};
pub use source::{parse_captions, DirectorySource, SourceError, SubtitleSource};
pub use worker::{LoadResult, SubtitleLoader};
