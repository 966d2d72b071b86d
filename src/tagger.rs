//! Per-buffer tag state and invalidation
//!
//! One [`BufferTagger`] per open editor buffer. It caches the last-pulled
//! [`SessionFileView`] with its [`FileIndex`], and the [`LineMap`] for the
//! buffer's text snapshot. The two inputs go stale independently: a view
//! replacement never invalidates the line map, a text edit never
//! invalidates the index. All mutation goes through `&mut self`; the borrow
//! checker enforces the single-writer discipline the editor's foreground
//! sequence provides. Buffers share nothing, so hosts may drive one tagger
//! per buffer concurrently.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::config::GutterConfig;
use crate::index::{DataIntegrityWarning, FileIndex};
use crate::mapping::{LineMap, MappedLine, TextSnapshot};
use crate::notify::{ChangeNotifier, LinesChanged, ranges_from_sorted};
use crate::session::{BufferId, SessionFileView, SessionProvider};
use crate::tags::{LineTag, resolve_tag};

/// Behavior knobs for one tagger
#[derive(Debug, Clone)]
pub struct TaggerOptions {
    /// Track text edits and remap lines; off for buffers pinned to the
    /// diffed revision (read-only review panes)
    pub live_updates: bool,
    /// Merge runs of adjacent commentable lines into one span
    pub coalesce_spans: bool,
}

impl Default for TaggerOptions {
    fn default() -> Self {
        Self { live_updates: true, coalesce_spans: true }
    }
}

impl From<&GutterConfig> for TaggerOptions {
    fn from(config: &GutterConfig) -> Self {
        let defaults = Self::default();
        Self {
            live_updates: config.live_updates.unwrap_or(defaults.live_updates),
            coalesce_spans: config.coalesce_spans.unwrap_or(defaults.coalesce_spans),
        }
    }
}

/// One tagged run of buffer lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    /// Half-open 0-based buffer line range
    pub lines: Range<u32>,
    pub tag: LineTag,
}

/// Cached tag state for one buffer
///
/// Untagged lines never appear in results; a buffer outside the active
/// review simply produces no spans.
#[derive(Debug)]
pub struct BufferTagger<P> {
    buffer: BufferId,
    provider: P,
    options: TaggerOptions,
    view: Option<Arc<SessionFileView>>,
    index: Option<FileIndex>,
    view_pulled: bool,
    snapshot: Option<TextSnapshot>,
    map: LineMap,
    map_version: Option<u64>,
    notifier: ChangeNotifier,
    disposed: bool,
}

impl<P: SessionProvider> BufferTagger<P> {
    #[must_use]
    pub fn new(buffer: BufferId, provider: P) -> Self {
        Self::with_options(buffer, provider, TaggerOptions::default())
    }

    #[must_use]
    pub fn with_options(buffer: BufferId, provider: P, options: TaggerOptions) -> Self {
        Self {
            buffer,
            provider,
            options,
            view: None,
            index: None,
            view_pulled: false,
            snapshot: None,
            map: LineMap::identity(u32::MAX),
            map_version: None,
            notifier: ChangeNotifier::default(),
            disposed: false,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &BufferId {
        &self.buffer
    }

    /// The view snapshot tags are currently resolved against, if any.
    #[must_use]
    pub fn view(&self) -> Option<&SessionFileView> {
        self.view.as_deref()
    }

    /// Anomalies recorded while indexing the current view.
    #[must_use]
    pub fn warnings(&self) -> &[DataIntegrityWarning] {
        self.index.as_ref().map_or(&[], FileIndex::warnings)
    }

    /// Receive [`LinesChanged`] after every state replacement that may have
    /// re-tagged lines.
    pub fn subscribe(&mut self) -> Receiver<LinesChanged> {
        self.assert_live();
        self.notifier.subscribe()
    }

    /// The session, file diff, or thread set changed: re-pull the view and
    /// swap it in, announcing exactly the lines whose entry differs.
    pub fn notify_view_changed(&mut self) {
        self.assert_live();
        let view = self.provider.session_view(&self.buffer);
        self.replace_view(view);
    }

    /// The buffer text changed: remember the snapshot and announce the
    /// affected suffix. The line map itself is rebuilt lazily on the next
    /// tag request. Ignored when `live_updates` is off.
    pub fn update_text(&mut self, snapshot: TextSnapshot) {
        self.assert_live();
        if !self.options.live_updates {
            return;
        }

        let previous_extent =
            self.snapshot.as_ref().map_or(snapshot.line_count, |s| s.line_count);
        let start = snapshot.edits.iter().map(|e| e.start).min().unwrap_or(0);
        let end = previous_extent.max(snapshot.line_count);

        tracing::debug!(
            buffer = %self.buffer,
            version = snapshot.version,
            edits = snapshot.edits.len(),
            "replaced text snapshot"
        );
        self.snapshot = Some(snapshot);

        if start < end {
            self.send_changed(vec![start..end]);
        }
    }

    /// Resolve tags for a range of buffer lines.
    ///
    /// Pulls the view on the first request ever made on this buffer;
    /// afterwards the cached view stands until [`notify_view_changed`]
    /// replaces it. Rebuilds whichever cached structure is stale, then
    /// resolves each line; untagged lines are omitted and adjacent
    /// commentable lines coalesce when the option is on. With no
    /// intervening invalidation, repeated calls return identical results.
    ///
    /// [`notify_view_changed`]: Self::notify_view_changed
    pub fn tags_in(&mut self, lines: Range<u32>) -> Vec<TagSpan> {
        self.assert_live();
        if !self.view_pulled {
            let view = self.provider.session_view(&self.buffer);
            self.replace_view(view);
        }
        self.refresh_map_if_stale();

        let (Some(view), Some(index)) = (self.view.as_ref(), self.index.as_ref()) else {
            return Vec::new();
        };

        // Lines past the last keyed line (or past the snapshot extent, once
        // a snapshot arrived) never resolve to a tag, so the walk stops
        // there even for a whole-buffer request.
        let ceiling = match self.map_version {
            Some(_) => self.map.line_count(),
            None => index.max_keyed_line().map_or(0, |line| line.saturating_add(1)),
        };
        let end = lines.end.min(ceiling);

        let mut spans: Vec<TagSpan> = Vec::new();
        for line in lines.start..end {
            let MappedLine::Aligned(aligned) = self.map.aligned_line(line) else {
                continue;
            };
            let kind = index.line_kind_of(aligned);
            let threads = index.threads_at(aligned);
            let Some(tag) = resolve_tag(view.side, kind, threads) else {
                continue;
            };
            push_span(&mut spans, line, tag, self.options.coalesce_spans);
        }
        spans
    }

    /// Detach the buffer, discarding all cached state.
    ///
    /// Any call after this one is a contract violation and panics.
    pub fn dispose(&mut self) {
        self.assert_live();
        self.disposed = true;
        self.view = None;
        self.index = None;
        self.snapshot = None;
        self.map = LineMap::identity(0);
        self.map_version = None;
        tracing::debug!(buffer = %self.buffer, "tagger disposed");
    }

    fn assert_live(&self) {
        assert!(!self.disposed, "tagger for {} used after dispose", self.buffer);
    }

    fn replace_view(&mut self, view: Option<Arc<SessionFileView>>) {
        // A pending text snapshot folds in first so the change signal maps
        // index keys through current line positions.
        self.refresh_map_if_stale();

        let index = view.as_ref().map(|view| FileIndex::build(view));
        let ranges = self.changed_ranges(index.as_ref());

        match view.as_ref() {
            Some(view) => tracing::debug!(
                buffer = %self.buffer,
                version = view.version,
                "replaced session view"
            ),
            None => tracing::debug!(buffer = %self.buffer, "session view cleared"),
        }

        self.view = view;
        self.index = index;
        self.view_pulled = true;

        if !ranges.is_empty() {
            self.send_changed(ranges);
        }
    }

    /// Buffer lines whose (kind, threads) entry differs between the cached
    /// index and its replacement.
    fn changed_ranges(&self, next: Option<&FileIndex>) -> Vec<Range<u32>> {
        let current = self.index.as_ref();
        let mut keys: BTreeSet<u32> = BTreeSet::new();
        if let Some(index) = current {
            keys.extend(index.keyed_lines());
        }
        if let Some(index) = next {
            keys.extend(index.keyed_lines());
        }

        let changed = keys.into_iter().filter(|&key| {
            let before = current.map(|index| (index.line_kind_of(key), index.threads_at(key)));
            let after = next.map(|index| (index.line_kind_of(key), index.threads_at(key)));
            before != after
        });
        let buffer_lines = changed.filter_map(|key| self.map.buffer_line_for(key));
        ranges_from_sorted(buffer_lines)
    }

    fn refresh_map_if_stale(&mut self) {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };
        if self.map_version != Some(snapshot.version) {
            self.map = LineMap::from_snapshot(snapshot);
            self.map_version = Some(snapshot.version);
        }
    }

    fn send_changed(&mut self, ranges: Vec<Range<u32>>) {
        let change = LinesChanged { buffer: self.buffer.clone(), ranges };
        self.notifier.send(&change);
    }
}

fn push_span(spans: &mut Vec<TagSpan>, line: u32, tag: LineTag, coalesce: bool) {
    if coalesce && tag == LineTag::AddComment {
        if let Some(last) = spans.last_mut() {
            if last.tag == LineTag::AddComment && last.lines.end == line {
                last.lines.end = line + 1;
                return;
            }
        }
    }
    spans.push(TagSpan { lines: line..line + 1, tag });
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::diff::{DiffHunk, DiffLine, DiffLineKind};
    use crate::mapping::LineEdit;
    use crate::session::{CommentThread, Side};

    #[derive(Clone, Default)]
    struct FakeProvider {
        view: Rc<RefCell<Option<Arc<SessionFileView>>>>,
        pulls: Rc<Cell<usize>>,
    }

    impl FakeProvider {
        fn set_view(&self, view: SessionFileView) {
            *self.view.borrow_mut() = Some(Arc::new(view));
        }
    }

    impl SessionProvider for FakeProvider {
        fn session_view(&self, _buffer: &BufferId) -> Option<Arc<SessionFileView>> {
            self.pulls.set(self.pulls.get() + 1);
            self.view.borrow().clone()
        }
    }

    fn line(kind: DiffLineKind, old: Option<u32>, new: Option<u32>) -> DiffLine {
        DiffLine { kind, old_line: old, new_line: new, content: String::new() }
    }

    fn hunk(lines: Vec<DiffLine>) -> DiffHunk {
        DiffHunk {
            header: "@@".to_string(),
            old_start: 1,
            old_count: 0,
            new_start: 1,
            new_count: 0,
            lines,
        }
    }

    fn thread(id: &str, side: Side, line_number: u32) -> CommentThread {
        CommentThread {
            id: id.to_string(),
            side,
            line_number,
            comment_count: 1,
        }
    }

    fn view(
        side: Side,
        version: u64,
        hunks: Vec<DiffHunk>,
        threads: Vec<CommentThread>,
    ) -> SessionFileView {
        SessionFileView {
            file_path: "src/lib.rs".to_string(),
            side,
            base_sha: "base".to_string(),
            commit_sha: "head".to_string(),
            version,
            hunks,
            threads,
        }
    }

    fn tagger(provider: &FakeProvider) -> BufferTagger<FakeProvider> {
        BufferTagger::new(BufferId("buf".to_string()), provider.clone())
    }

    #[test]
    fn test_added_line_on_right_side_offers_comment() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![
                line(DiffLineKind::Add, None, Some(12)),
                line(DiffLineKind::Delete, Some(14), None),
            ])],
            vec![],
        ));
        let mut tagger = tagger(&provider);

        let spans = tagger.tags_in(0..30);

        // New-line 12 is buffer line 11; the delete only exists on the old
        // side, so line 13 stays untagged
        assert_eq!(
            spans,
            vec![TagSpan { lines: 11..12, tag: LineTag::AddComment }]
        );
    }

    #[test]
    fn test_thread_without_diff_entry_still_shows() {
        let provider = FakeProvider::default();
        let t = thread("t1", Side::Right, 10);
        provider.set_view(view(Side::Right, 1, vec![], vec![t.clone()]));
        let mut tagger = tagger(&provider);

        let spans = tagger.tags_in(0..20);

        assert_eq!(
            spans,
            vec![TagSpan { lines: 10..11, tag: LineTag::ShowComment(vec![t]) }]
        );
    }

    #[test]
    fn test_deleted_line_on_left_side_offers_comment() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Left,
            1,
            vec![hunk(vec![line(DiffLineKind::Delete, Some(14), None)])],
            vec![],
        ));
        let mut tagger = tagger(&provider);

        let spans = tagger.tags_in(0..20);

        assert_eq!(
            spans,
            vec![TagSpan { lines: 13..14, tag: LineTag::AddComment }]
        );
    }

    #[test]
    fn test_left_side_thread_shows_alongside_delete() {
        let provider = FakeProvider::default();
        let t = thread("t1", Side::Left, 12);
        provider.set_view(view(
            Side::Left,
            1,
            vec![hunk(vec![line(DiffLineKind::Delete, Some(14), None)])],
            vec![t.clone()],
        ));
        let mut tagger = tagger(&provider);

        let spans = tagger.tags_in(0..20);

        assert_eq!(
            spans,
            vec![
                TagSpan { lines: 12..13, tag: LineTag::ShowComment(vec![t]) },
                TagSpan { lines: 13..14, tag: LineTag::AddComment },
            ]
        );
    }

    #[test]
    fn test_thread_wins_over_commentable_line() {
        let provider = FakeProvider::default();
        let t = thread("t1", Side::Right, 11);
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![t.clone()],
        ));
        let mut tagger = tagger(&provider);

        let spans = tagger.tags_in(0..20);

        assert_eq!(
            spans,
            vec![TagSpan { lines: 11..12, tag: LineTag::ShowComment(vec![t]) }]
        );
    }

    #[test]
    fn test_buffer_outside_review_resolves_nothing() {
        let provider = FakeProvider::default();
        let mut tagger = tagger(&provider);
        let rx = tagger.subscribe();

        assert!(tagger.tags_in(0..50).is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_view_arrival_signals_newly_tagged_lines() {
        let provider = FakeProvider::default();
        let mut tagger = tagger(&provider);
        let rx = tagger.subscribe();

        // First pass: no session yet
        assert!(tagger.tags_in(0..30).is_empty());

        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![thread("t1", Side::Right, 10)],
        ));
        tagger.notify_view_changed();

        let change = rx.try_recv().unwrap();
        assert_eq!(change.ranges, vec![10..12]);
        assert_eq!(tagger.tags_in(0..30).len(), 2);
    }

    #[test]
    fn test_repeated_requests_hit_the_cache() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(3))])],
            vec![],
        ));
        let mut tagger = tagger(&provider);

        let first = tagger.tags_in(0..10);
        let second = tagger.tags_in(0..10);

        assert_eq!(first, second);
        // One pull at first request; the cached view serves the second
        assert_eq!(provider.pulls.get(), 1);
    }

    #[test]
    fn test_warnings_and_view_surface_after_pull() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![
                hunk(vec![line(DiffLineKind::Unchanged, Some(5), Some(5))]),
                hunk(vec![line(DiffLineKind::Add, None, Some(5))]),
            ],
            vec![],
        ));
        let mut tagger = tagger(&provider);

        // Nothing pulled yet
        assert!(tagger.view().is_none());
        assert!(tagger.warnings().is_empty());

        tagger.tags_in(0..10);

        assert_eq!(tagger.view().map(|v| v.version), Some(1));
        assert_eq!(
            tagger.warnings(),
            &[DataIntegrityWarning::DuplicateLine { side: Side::Right, line: 4 }]
        );
    }

    #[test]
    fn test_whole_buffer_request_stops_at_the_last_tag() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![thread("far", Side::Right, 40)],
        ));
        let mut tagger = tagger(&provider);

        let spans = tagger.tags_in(0..u32::MAX);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].lines, 11..12);
        assert_eq!(spans[1].lines, 40..41);

        // Same request with a snapshot in place walks the snapshot extent
        tagger.update_text(TextSnapshot { version: 1, line_count: 60, edits: vec![] });
        assert_eq!(tagger.tags_in(0..u32::MAX).len(), 2);
    }

    #[test]
    fn test_view_swap_signals_only_differing_lines() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![thread("t1", Side::Right, 10)],
        ));
        let mut tagger = tagger(&provider);
        tagger.tags_in(0..30);
        let rx = tagger.subscribe();

        // Same diff, thread moved from line 10 to line 20
        provider.set_view(view(
            Side::Right,
            2,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![thread("t1", Side::Right, 20)],
        ));
        tagger.notify_view_changed();

        let change = rx.try_recv().unwrap();
        assert_eq!(change.ranges, vec![10..11, 20..21]);
    }

    #[test]
    fn test_view_swap_signal_maps_through_pending_text_edit() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![],
            vec![thread("t1", Side::Right, 10)],
        ));
        let mut tagger = tagger(&provider);
        tagger.tags_in(0..40);

        // Three lines inserted at the top; no tag request in between, so
        // the line map is still pending when the view swap arrives
        tagger.update_text(TextSnapshot {
            version: 1,
            line_count: 40,
            edits: vec![LineEdit { start: 0, old_lines: 0, new_lines: 3 }],
        });
        let rx = tagger.subscribe();

        // Thread moved from line 10 to line 20
        provider.set_view(view(
            Side::Right,
            2,
            vec![],
            vec![thread("t1", Side::Right, 20)],
        ));
        tagger.notify_view_changed();

        // The swap signal names both changed lines at their shifted buffer
        // positions, not the unshifted index keys
        assert_eq!(rx.try_recv().unwrap().ranges, vec![13..14, 23..24]);
    }

    #[test]
    fn test_identical_view_swap_is_silent() {
        let provider = FakeProvider::default();
        let make = |version| {
            view(
                Side::Right,
                version,
                vec![hunk(vec![line(DiffLineKind::Add, None, Some(5))])],
                vec![thread("t1", Side::Right, 2)],
            )
        };
        provider.set_view(make(1));
        let mut tagger = tagger(&provider);
        tagger.tags_in(0..10);
        let rx = tagger.subscribe();

        provider.set_view(make(2));
        tagger.notify_view_changed();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_text_edit_shifts_tags_below_it() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![],
        ));
        let mut tagger = tagger(&provider);
        tagger.tags_in(0..40);
        let rx = tagger.subscribe();

        // Three lines inserted at the top of the buffer
        tagger.update_text(TextSnapshot {
            version: 1,
            line_count: 40,
            edits: vec![LineEdit { start: 0, old_lines: 0, new_lines: 3 }],
        });

        assert_eq!(rx.try_recv().unwrap().ranges, vec![0..40]);
        assert_eq!(
            tagger.tags_in(0..40),
            vec![TagSpan { lines: 14..15, tag: LineTag::AddComment }]
        );
    }

    #[test]
    fn test_edited_line_loses_its_tag() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Unchanged, Some(5), Some(5))])],
            vec![],
        ));
        let mut tagger = tagger(&provider);
        assert_eq!(tagger.tags_in(0..10).len(), 1);

        tagger.update_text(TextSnapshot {
            version: 1,
            line_count: 10,
            edits: vec![LineEdit { start: 4, old_lines: 1, new_lines: 1 }],
        });

        assert!(tagger.tags_in(0..10).is_empty());
    }

    #[test]
    fn test_text_signal_covers_the_affected_suffix() {
        let provider = FakeProvider::default();
        let mut tagger = tagger(&provider);
        let rx = tagger.subscribe();

        tagger.update_text(TextSnapshot {
            version: 1,
            line_count: 30,
            edits: vec![LineEdit { start: 7, old_lines: 2, new_lines: 2 }],
        });

        assert_eq!(rx.try_recv().unwrap().ranges, vec![7..30]);
    }

    #[test]
    fn test_text_signal_reaches_the_old_extent_on_shrink() {
        let provider = FakeProvider::default();
        let mut tagger = tagger(&provider);

        tagger.update_text(TextSnapshot { version: 1, line_count: 30, edits: vec![] });
        let rx = tagger.subscribe();

        // Deleting 18 lines at 5 shrinks the buffer to 12 lines; lines up
        // to the previous extent may still need re-tagging
        tagger.update_text(TextSnapshot {
            version: 2,
            line_count: 12,
            edits: vec![LineEdit { start: 5, old_lines: 18, new_lines: 0 }],
        });

        assert_eq!(rx.try_recv().unwrap().ranges, vec![5..30]);
    }

    #[test]
    fn test_live_updates_off_pins_the_alignment() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![line(DiffLineKind::Add, None, Some(12))])],
            vec![],
        ));
        let options = TaggerOptions { live_updates: false, ..TaggerOptions::default() };
        let mut tagger = BufferTagger::with_options(
            BufferId("buf".to_string()),
            provider.clone(),
            options,
        );
        tagger.tags_in(0..40);
        let rx = tagger.subscribe();

        tagger.update_text(TextSnapshot {
            version: 1,
            line_count: 40,
            edits: vec![LineEdit { start: 0, old_lines: 0, new_lines: 3 }],
        });

        assert!(rx.try_recv().is_err());
        assert_eq!(
            tagger.tags_in(0..40),
            vec![TagSpan { lines: 11..12, tag: LineTag::AddComment }]
        );
    }

    #[test]
    fn test_adjacent_commentable_lines_coalesce() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![
                line(DiffLineKind::Unchanged, Some(1), Some(1)),
                line(DiffLineKind::Unchanged, Some(2), Some(2)),
                line(DiffLineKind::Add, None, Some(3)),
            ])],
            vec![],
        ));
        let mut tagger = tagger(&provider);

        assert_eq!(
            tagger.tags_in(0..10),
            vec![TagSpan { lines: 0..3, tag: LineTag::AddComment }]
        );
    }

    #[test]
    fn test_span_coalescing_can_be_disabled() {
        let provider = FakeProvider::default();
        provider.set_view(view(
            Side::Right,
            1,
            vec![hunk(vec![
                line(DiffLineKind::Unchanged, Some(1), Some(1)),
                line(DiffLineKind::Unchanged, Some(2), Some(2)),
            ])],
            vec![],
        ));
        let options = TaggerOptions { coalesce_spans: false, ..TaggerOptions::default() };
        let mut tagger = BufferTagger::with_options(
            BufferId("buf".to_string()),
            provider.clone(),
            options,
        );

        assert_eq!(tagger.tags_in(0..10).len(), 2);
    }

    #[test]
    #[should_panic(expected = "used after dispose")]
    fn test_use_after_dispose_panics() {
        let provider = FakeProvider::default();
        let mut tagger = tagger(&provider);
        tagger.dispose();
        let _ = tagger.tags_in(0..1);
    }
}
