//! Review session context types
//!
//! A buffer participating in a review is described by a [`SessionFileView`]:
//! which file, which half of the split view, the diff against the base
//! commit, and the active comment threads. Views are versioned snapshots
//! produced by an external session manager and swapped wholesale; nothing in
//! this crate mutates one after publication.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diff::DiffHunk;

/// Which half of a split diff view a buffer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Base revision (old text)
    Left,
    /// Head revision (new text)
    Right,
}

/// One anchored review conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub side: Side,
    /// 0-based line number relative to the thread's side
    pub line_number: u32,
    /// Number of comments in the thread, at least one
    pub comment_count: u32,
}

/// Opaque identity of one open editor buffer
///
/// The host chooses the contents; two buffers showing the same file on
/// different sides are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferId(pub String);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Side-scoped review context for one open buffer
///
/// Replaced (never patched) on every session, diff, or thread change. The
/// `version` increases with each replacement so caches can compare cheaply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFileView {
    /// Repository-relative path of the reviewed file
    pub file_path: String,
    pub side: Side,
    /// Commit the left side was produced from
    pub base_sha: String,
    /// Commit the right side was produced from
    pub commit_sha: String,
    pub version: u64,
    pub hunks: Vec<DiffHunk>,
    pub threads: Vec<CommentThread>,
}

/// Pull boundary to the session manager
///
/// The tagger asks for the current view once per change notification and at
/// most once per tag request on a freshly attached buffer. `None` means the
/// buffer is not part of the active review, which is a valid state: every
/// line resolves to no tag.
pub trait SessionProvider {
    fn session_view(&self, buffer: &BufferId) -> Option<Arc<SessionFileView>>;
}
