//! Unified diff parser
//!
//! Parses standard unified diff format into the structured hunks consumed by
//! the index. This is a boundary adapter for hosts that hold raw patch text;
//! the tagging core itself only ever sees the parsed form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parsed unified diff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedDiff {
    pub file_a: Option<String>,
    pub file_b: Option<String>,
    pub hunks: Vec<DiffHunk>,
}

/// A single hunk from a diff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffHunk {
    /// The @@ header line
    pub header: String,
    /// Starting line in old file
    pub old_start: u32,
    /// Number of lines in old file
    pub old_count: u32,
    /// Starting line in new file
    pub new_start: u32,
    /// Number of lines in new file
    pub new_count: u32,
    /// Lines in this hunk
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// 1-based line number in the old file (if the line exists there)
    pub old_line: Option<u32>,
    /// 1-based line number in the new file (if the line exists there)
    pub new_line: Option<u32>,
    /// The line content (without the +/- prefix)
    pub content: String,
}

/// Classification of a diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    /// Present on both sides; carries both line numbers
    Unchanged,
    /// Present only in the new file
    Add,
    /// Present only in the old file
    Delete,
    /// "\ No newline at end of file" marker; carries no line numbers
    NoNewline,
}

/// Malformed hunk structure detected by [`ParsedDiff::parse_strict`]
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed hunk header: {header}")]
    BadHunkHeader { header: String },
    #[error("malformed hunk range: {text}")]
    BadRange { text: String },
}

impl ParsedDiff {
    /// Parse a unified diff string, skipping hunks with malformed headers.
    #[must_use]
    pub fn parse(diff: &str) -> Self {
        let mut result = Self::default();
        let mut lines = diff.lines().peekable();

        (result.file_a, result.file_b) = parse_file_header(&mut lines);

        while let Some(line) = lines.next() {
            if line.starts_with("@@") {
                if let Ok(hunk) = Self::parse_hunk(line, &mut lines) {
                    result.hunks.push(hunk);
                }
            }
        }

        result
    }

    /// Parse a unified diff string, rejecting malformed hunk headers.
    ///
    /// Line-level oddities inside a hunk are still tolerated the way
    /// [`parse`](Self::parse) tolerates them; only the `@@` structure is
    /// validated. An input with no hunks at all parses to an empty diff.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if any `@@` header or its line ranges cannot
    /// be parsed.
    pub fn parse_strict(diff: &str) -> Result<Self, ParseError> {
        let mut result = Self::default();
        let mut lines = diff.lines().peekable();

        (result.file_a, result.file_b) = parse_file_header(&mut lines);

        while let Some(line) = lines.next() {
            if line.starts_with("@@") {
                result.hunks.push(Self::parse_hunk(line, &mut lines)?);
            }
        }

        Ok(result)
    }

    fn parse_hunk(
        header: &str,
        lines: &mut std::iter::Peekable<std::str::Lines<'_>>,
    ) -> Result<DiffHunk, ParseError> {
        // Parse @@ -start,count +start,count @@ optional context
        // Example: @@ -1,5 +1,7 @@ fn main() {
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(ParseError::BadHunkHeader { header: header.to_string() });
        }

        let (old_start, old_count) = parse_range(parts[1].trim_start_matches('-'))?;
        let (new_start, new_count) = parse_range(parts[2].trim_start_matches('+'))?;

        let mut hunk = DiffHunk {
            header: header.to_string(),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        };

        let mut old_line = old_start;
        let mut new_line = new_start;

        while let Some(line) = lines.peek() {
            if line.starts_with("@@") || line.starts_with("diff ") {
                break;
            }

            let line = lines.next().unwrap_or_default();

            let (kind, content) = if let Some(content) = line.strip_prefix('+') {
                (DiffLineKind::Add, content)
            } else if let Some(content) = line.strip_prefix('-') {
                (DiffLineKind::Delete, content)
            } else if let Some(content) = line.strip_prefix(' ') {
                (DiffLineKind::Unchanged, content)
            } else if line.is_empty() {
                // Empty context line
                (DiffLineKind::Unchanged, "")
            } else if let Some(content) = line.strip_prefix('\\') {
                // "\ No newline at end of file"
                (DiffLineKind::NoNewline, content.trim_start())
            } else {
                // Unknown line format, treat as context
                (DiffLineKind::Unchanged, line)
            };

            let diff_line = match kind {
                DiffLineKind::Add => {
                    let dl = DiffLine {
                        kind,
                        old_line: None,
                        new_line: Some(new_line),
                        content: content.to_string(),
                    };
                    new_line += 1;
                    dl
                }
                DiffLineKind::Delete => {
                    let dl = DiffLine {
                        kind,
                        old_line: Some(old_line),
                        new_line: None,
                        content: content.to_string(),
                    };
                    old_line += 1;
                    dl
                }
                DiffLineKind::Unchanged => {
                    let dl = DiffLine {
                        kind,
                        old_line: Some(old_line),
                        new_line: Some(new_line),
                        content: content.to_string(),
                    };
                    old_line += 1;
                    new_line += 1;
                    dl
                }
                DiffLineKind::NoNewline => DiffLine {
                    kind,
                    old_line: None,
                    new_line: None,
                    content: content.to_string(),
                },
            };

            hunk.lines.push(diff_line);
        }

        Ok(hunk)
    }
}

fn parse_file_header(
    lines: &mut std::iter::Peekable<std::str::Lines<'_>>,
) -> (Option<String>, Option<String>) {
    let mut file_a = None;
    let mut file_b = None;

    while let Some(line) = lines.peek() {
        if line.starts_with("---") {
            file_a = line.strip_prefix("--- ").map(|s| {
                // Remove a/ prefix if present
                s.strip_prefix("a/").unwrap_or(s).to_string()
            });
            lines.next();
        } else if line.starts_with("+++") {
            file_b = line.strip_prefix("+++ ").map(|s| {
                // Remove b/ prefix if present
                s.strip_prefix("b/").unwrap_or(s).to_string()
            });
            lines.next();
        } else if line.starts_with("@@") {
            break;
        } else {
            lines.next(); // Skip other header lines (diff --git, index, etc.)
        }
    }

    (file_a, file_b)
}

fn parse_range(s: &str) -> Result<(u32, u32), ParseError> {
    let parse = |text: &str| {
        text.parse::<u32>().map_err(|_| ParseError::BadRange { text: s.to_string() })
    };
    if let Some((start, count)) = s.split_once(',') {
        Ok((parse(start)?, parse(count)?))
    } else {
        // Single line: "5" means start=5, count=1
        Ok((parse(s)?, 1))
    }
}
