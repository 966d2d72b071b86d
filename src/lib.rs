//! review-gutter - inline comment tagging engine for split diff review editors
//!
//! Classifies each buffer line of a review session file as commentable,
//! carrying existing comment threads, or untagged, and keeps that
//! classification current as the session, the diff, and the buffer text
//! change independently.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

pub mod config;
pub mod diff;
pub mod index;
pub mod mapping;
pub mod notify;
pub mod session;
pub mod tagger;
pub mod tags;

pub use config::{GutterConfig, load_config, save_config};
pub use index::{DataIntegrityWarning, FileIndex};
pub use mapping::{LineEdit, LineMap, MappedLine, TextSnapshot};
pub use notify::LinesChanged;
pub use session::{BufferId, CommentThread, SessionFileView, SessionProvider, Side};
pub use tagger::{BufferTagger, TagSpan, TaggerOptions};
pub use tags::{LineTag, resolve_tag};
