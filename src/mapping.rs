//! Buffer-to-diff line alignment
//!
//! A diff is computed against one revision of the file; the buffer the user
//! edits drifts away from it line by line. [`LineMap`] folds the edits the
//! host has accumulated since that revision into contiguous shift segments,
//! answering "which diff-side line does buffer line L correspond to now".
//! Lines inside an edited span have no stable correspondence until the diff
//! is recomputed upstream.

use serde::{Deserialize, Serialize};

/// One line-granular replacement applied to the buffer
///
/// `start` counts 0-based lines in the text as it stood immediately before
/// this edit; `old_lines` lines there were replaced by `new_lines` lines.
/// Pure insertions have `old_lines == 0`, pure deletions `new_lines == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEdit {
    pub start: u32,
    pub old_lines: u32,
    pub new_lines: u32,
}

/// The buffer's current text state, published by the host after each edit
/// batch
///
/// `edits` lists every [`LineEdit`] since the text matched the diffed
/// revision, oldest first. An empty list means the buffer is still aligned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextSnapshot {
    pub version: u64,
    /// Lines in the buffer as of this snapshot
    pub line_count: u32,
    pub edits: Vec<LineEdit>,
}

/// Where a buffer line lands relative to the diffed revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedLine {
    /// Corresponds to this 0-based line of the diffed text
    Aligned(u32),
    /// Inside an edited span; no stable correspondence
    Edited,
    /// Past the end of the buffer
    OutOfRange,
}

/// Buffer lines `[start, end)` correspond to diffed-text lines shifted by
/// `delta`; the spans between segments are edited.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: u32,
    end: u32,
    delta: i64,
}

/// Cached alignment for one buffer, rebuilt when the text snapshot changes
#[derive(Debug, Clone)]
pub struct LineMap {
    segments: Vec<Segment>,
    line_count: u32,
}

impl LineMap {
    /// Map for a buffer whose text still matches the diffed revision.
    #[must_use]
    pub fn identity(line_count: u32) -> Self {
        Self {
            segments: vec![Segment { start: 0, end: u32::MAX, delta: 0 }],
            line_count,
        }
    }

    /// Fold a snapshot's edit list into a segment table.
    ///
    /// Each edit splits the segments it touches: the replaced span drops
    /// out, everything below keeps its place, everything above shifts by
    /// the edit's line delta.
    #[must_use]
    pub fn from_snapshot(snapshot: &TextSnapshot) -> Self {
        let mut segments = vec![Segment { start: 0, end: u32::MAX, delta: 0 }];
        for edit in &snapshot.edits {
            segments = apply_edit(&segments, *edit);
        }

        tracing::trace!(
            version = snapshot.version,
            edits = snapshot.edits.len(),
            segments = segments.len(),
            "rebuilt line map"
        );

        Self { segments, line_count: snapshot.line_count }
    }

    /// The diffed-text line a buffer line corresponds to, if any.
    #[must_use]
    pub fn aligned_line(&self, buffer_line: u32) -> MappedLine {
        if buffer_line >= self.line_count {
            return MappedLine::OutOfRange;
        }
        let idx = self.segments.partition_point(|seg| seg.end <= buffer_line);
        match self.segments.get(idx) {
            Some(seg) if seg.start <= buffer_line => {
                u32::try_from(i64::from(buffer_line) + seg.delta)
                    .map_or(MappedLine::OutOfRange, MappedLine::Aligned)
            }
            _ => MappedLine::Edited,
        }
    }

    /// The buffer line currently showing a diffed-text line.
    ///
    /// `None` when that line's span was edited away or has scrolled past
    /// the end of the buffer.
    #[must_use]
    pub fn buffer_line_for(&self, aligned: u32) -> Option<u32> {
        let target = i64::from(aligned);
        for seg in &self.segments {
            let lo = i64::from(seg.start) + seg.delta;
            let hi = i64::from(seg.end) + seg.delta;
            if target >= lo && target < hi {
                let buffer = u32::try_from(target - seg.delta).ok()?;
                return (buffer < self.line_count).then_some(buffer);
            }
        }
        None
    }

    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.line_count
    }
}

fn apply_edit(segments: &[Segment], edit: LineEdit) -> Vec<Segment> {
    let start = edit.start;
    let old_end = start.saturating_add(edit.old_lines);
    let shift = i64::from(edit.old_lines) - i64::from(edit.new_lines);
    let mut out = Vec::with_capacity(segments.len() + 1);

    for seg in segments {
        // Piece below the edit keeps its place
        if seg.start < start {
            out.push(Segment {
                start: seg.start,
                end: seg.end.min(start),
                delta: seg.delta,
            });
        }
        // Piece above the replaced span shifts by the edit's line delta;
        // the replaced span itself drops out, leaving a gap
        if seg.end > old_end {
            let begin = seg.start.max(old_end);
            out.push(Segment {
                start: clamp_line(i64::from(begin) - shift),
                end: clamp_line(i64::from(seg.end) - shift),
                delta: seg.delta + shift,
            });
        }
    }

    out
}

fn clamp_line(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
