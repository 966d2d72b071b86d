//! Per-line tag resolution
//!
//! The decision table that turns (side, diff line kind, anchored threads)
//! into the affordance shown in the editor gutter.

use serde::{Deserialize, Serialize};

use crate::diff::DiffLineKind;
use crate::session::{CommentThread, Side};

/// The affordance shown for one buffer line
///
/// Lines with no affordance get no tag at all rather than a third variant,
/// so hosts never have to filter out an explicit "nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineTag {
    /// The line is commentable; offer to start a thread
    AddComment,
    /// Existing threads anchor here, in insertion order
    ShowComment(Vec<CommentThread>),
}

/// Decide the tag for one line.
///
/// Existing threads always win over the add affordance, even when the
/// line's diff classification would not qualify. With no threads, the
/// right side offers to comment on lines that exist in the new file
/// (unchanged or added) and the left side on lines that exist in the old
/// file (unchanged or deleted). Everything else, including lines the diff
/// does not mention, gets no tag. Total over its domain; never panics.
#[must_use]
pub fn resolve_tag(
    side: Side,
    kind: Option<DiffLineKind>,
    threads: &[CommentThread],
) -> Option<LineTag> {
    if !threads.is_empty() {
        return Some(LineTag::ShowComment(threads.to_vec()));
    }
    match (side, kind?) {
        (Side::Right, DiffLineKind::Unchanged | DiffLineKind::Add)
        | (Side::Left, DiffLineKind::Unchanged | DiffLineKind::Delete) => {
            Some(LineTag::AddComment)
        }
        _ => None,
    }
}
