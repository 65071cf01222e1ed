//! Timed subtitle segments and the ordered list the controller navigates.

use serde::{Deserialize, Serialize};

/// A time-ranged unit of subtitle text.
///
/// Times are milliseconds relative to the start of the media. The range
/// covered by a segment is half-open: `[start_ms, end_ms)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start offset from media start
    pub start_ms: u64,
    /// Segment length (always > 0 once inside a `SegmentList`)
    pub duration_ms: u64,
    /// Text shown and practised for this segment
    pub text: String,
}

impl Segment {
    pub fn new(start_ms: u64, duration_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            duration_ms,
            text: text.into(),
        }
    }

    /// End offset (exclusive).
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Whether `position_ms` falls inside `[start_ms, end_ms)`.
    pub fn contains(&self, position_ms: u64) -> bool {
        self.start_ms <= position_ms && position_ms < self.end_ms()
    }

    /// Time left in this segment from `position_ms`, zero once the end is reached.
    pub fn remaining_ms(&self, position_ms: u64) -> u64 {
        self.end_ms().saturating_sub(position_ms)
    }
}

/// Immutable, start-ordered list of segments for one media identifier.
///
/// Construction sorts by start offset (stable, so equal starts keep the
/// delivered order) and drops zero-length segments. The list is never
/// mutated afterwards; a new media identifier gets a new list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentList {
    segments: Vec<Segment>,
    /// True when no segment ends after the next one starts.
    disjoint: bool,
}

impl SegmentList {
    pub fn new(mut segments: Vec<Segment>) -> Self {
        let before = segments.len();
        segments.retain(|s| s.duration_ms > 0);
        if segments.len() != before {
            tracing::debug!(
                dropped = before - segments.len(),
                "dropped zero-length segments"
            );
        }

        segments.sort_by_key(|s| s.start_ms);
        let disjoint = segments
            .windows(2)
            .all(|pair| pair[0].end_ms() <= pair[1].start_ms);
        if !disjoint {
            tracing::debug!("segment list contains overlapping segments");
        }

        Self { segments, disjoint }
    }

    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            disjoint: true,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// End of the last segment, or 0 for an empty list.
    pub fn total_ms(&self) -> u64 {
        self.segments.iter().map(Segment::end_ms).max().unwrap_or(0)
    }

    /// Index of the segment active at `position_ms`.
    ///
    /// Returns the first segment in list order with `start <= p < end`.
    /// Disjoint lists have non-decreasing end offsets, so a binary search
    /// for the first segment ending after `p` finds the only candidate.
    /// Overlapping lists fall back to a linear scan so "first match" holds.
    pub fn locate(&self, position_ms: u64) -> Option<usize> {
        if self.disjoint {
            let idx = self
                .segments
                .partition_point(|s| s.end_ms() <= position_ms);
            self.segments
                .get(idx)
                .filter(|s| s.start_ms <= position_ms)
                .map(|_| idx)
        } else {
            self.segments.iter().position(|s| s.contains(position_ms))
        }
    }
}

impl From<Vec<Segment>> for SegmentList {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
