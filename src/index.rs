//! Diff and thread lookup index
//!
//! Precomputes, from one [`SessionFileView`], the two per-line queries tag
//! resolution needs: the diff classification of a buffer line and the
//! threads anchored there. Building is one pass over hunks and threads;
//! queries are hash lookups keyed by 0-based side-relative buffer line.

use std::collections::HashMap;

use crate::diff::DiffLineKind;
use crate::session::{CommentThread, SessionFileView, Side};

/// Anomaly seen while indexing a diff
///
/// Well-formed diffs have strictly increasing line numbers per side and
/// never produce these. Indexing proceeds anyway (duplicates keep the last
/// write); the warnings are kept for the caller to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityWarning {
    /// Two diff entries claimed the same buffer line on this side
    DuplicateLine { side: Side, line: u32 },
    /// A diff entry appeared before an earlier line number on this side
    OutOfOrderLine { side: Side, line: u32 },
}

/// Lookup index over one view snapshot
///
/// A pure function of the immutable view it was built from; rebuilt only
/// when the view is replaced.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    line_kinds: HashMap<u32, DiffLineKind>,
    thread_groups: HashMap<u32, Vec<CommentThread>>,
    warnings: Vec<DataIntegrityWarning>,
    max_keyed: Option<u32>,
}

impl FileIndex {
    /// Build the index for a view, scanning every hunk line and thread once.
    ///
    /// The left side keys on old-file line numbers, the right side on
    /// new-file ones; lines absent from the chosen side (and no-newline
    /// markers, which have no numbers) are skipped. Threads on the opposite
    /// side are ignored; threads sharing a line keep their given order.
    #[must_use]
    pub fn build(view: &SessionFileView) -> Self {
        let total: usize = view.hunks.iter().map(|h| h.lines.len()).sum();
        let mut line_kinds = HashMap::with_capacity(total);
        let mut warnings = Vec::new();
        let mut watermark: Option<u32> = None;

        for hunk in &view.hunks {
            for line in &hunk.lines {
                let number = match view.side {
                    Side::Left => line.old_line,
                    Side::Right => line.new_line,
                };
                let Some(number) = number else { continue };
                // Diff line numbers are 1-based; buffer lines are 0-based.
                let key = number.saturating_sub(1);

                if line_kinds.insert(key, line.kind).is_some() {
                    warnings.push(DataIntegrityWarning::DuplicateLine {
                        side: view.side,
                        line: key,
                    });
                } else if watermark.is_some_and(|w| key < w) {
                    warnings.push(DataIntegrityWarning::OutOfOrderLine {
                        side: view.side,
                        line: key,
                    });
                }
                watermark = Some(watermark.map_or(key, |w| w.max(key)));
            }
        }

        let mut thread_groups: HashMap<u32, Vec<CommentThread>> = HashMap::new();
        for thread in &view.threads {
            if thread.side != view.side {
                continue;
            }
            thread_groups
                .entry(thread.line_number)
                .or_default()
                .push(thread.clone());
        }

        if !warnings.is_empty() {
            tracing::warn!(
                file = %view.file_path,
                side = ?view.side,
                count = warnings.len(),
                "diff produced duplicate or out-of-order line entries"
            );
        }

        let max_keyed = line_kinds.keys().chain(thread_groups.keys()).copied().max();

        Self { line_kinds, thread_groups, warnings, max_keyed }
    }

    /// Diff classification of a buffer line, if the diff mentions it.
    #[must_use]
    pub fn line_kind_of(&self, line: u32) -> Option<DiffLineKind> {
        self.line_kinds.get(&line).copied()
    }

    /// Threads anchored at a buffer line, in insertion order.
    #[must_use]
    pub fn threads_at(&self, line: u32) -> &[CommentThread] {
        self.thread_groups.get(&line).map_or(&[], Vec::as_slice)
    }

    /// Anomalies recorded while building, empty for well-formed diffs.
    #[must_use]
    pub fn warnings(&self) -> &[DataIntegrityWarning] {
        &self.warnings
    }

    /// Highest buffer line with a diff entry or thread, `None` when empty.
    #[must_use]
    pub fn max_keyed_line(&self) -> Option<u32> {
        self.max_keyed
    }

    /// Buffer lines that have a diff entry or an anchored thread.
    ///
    /// Lines carried by both maps appear twice; callers that need a set
    /// should collect into one.
    pub fn keyed_lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.line_kinds
            .keys()
            .chain(self.thread_groups.keys())
            .copied()
    }
}
