//! Unified diff model and parser

mod parse;

pub use parse::{DiffHunk, DiffLine, DiffLineKind, ParseError, ParsedDiff};
