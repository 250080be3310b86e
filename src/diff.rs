//! Unified diffs between the submitted source and the optimized version
//!
//! Whole-file, line-based comparison with three lines of context and
//! `Original`/`Optimized` headers. Identical inputs render as a placeholder.

use similar::{ChangeTag, TextDiff};

/// Shown when the optimized code matches the original line for line
pub const NO_CHANGES: &str = "No changes";

const CONTEXT_LINES: usize = 3;

/// A single rendered line of a unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `---`/`+++` file headers
    Header(String),
    /// `@@ -a,b +c,d @@`
    Hunk(String),
    Context(String),
    Add(String),
    Remove(String),
}

impl DiffLine {
    pub fn content(&self) -> &str {
        match self {
            DiffLine::Header(s) | DiffLine::Hunk(s) => s,
            DiffLine::Context(s) | DiffLine::Add(s) | DiffLine::Remove(s) => s,
        }
    }
}

/// Unified diff text, empty when nothing changed
pub fn unified_diff(original: &str, optimized: &str) -> String {
    let old = normalize_lines(original);
    let new = normalize_lines(optimized);
    let diff = TextDiff::from_lines(&old, &new);
    let rendered = diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header("Original", "Optimized")
        .to_string();
    rendered.trim_end_matches('\n').to_string()
}

/// Diff text for display, or [`NO_CHANGES`]
pub fn render_diff(original: &str, optimized: &str) -> String {
    let diff = unified_diff(original, optimized);
    if diff.trim().is_empty() {
        NO_CHANGES.to_string()
    } else {
        diff
    }
}

/// Classified diff lines for styled rendering (empty when nothing changed)
///
/// Built from the diff ops, so line content never decides the kind.
pub fn diff_lines(original: &str, optimized: &str) -> Vec<DiffLine> {
    let old = normalize_lines(original);
    let new = normalize_lines(optimized);
    let diff = TextDiff::from_lines(&old, &new);
    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_LINES);

    let mut lines = Vec::new();
    for hunk in unified.iter_hunks() {
        if lines.is_empty() {
            lines.push(DiffLine::Header("--- Original".to_string()));
            lines.push(DiffLine::Header("+++ Optimized".to_string()));
        }
        lines.push(DiffLine::Hunk(hunk.header().to_string()));
        for change in hunk.iter_changes() {
            let text = change.value().trim_end_matches('\n').to_string();
            lines.push(match change.tag() {
                ChangeTag::Equal => DiffLine::Context(text),
                ChangeTag::Delete => DiffLine::Remove(text),
                ChangeTag::Insert => DiffLine::Add(text),
            });
        }
    }
    lines
}

/// Addition and removal counts
pub fn stats(lines: &[DiffLine]) -> (usize, usize) {
    lines.iter().fold((0, 0), |(adds, removes), line| match line {
        DiffLine::Add(_) => (adds + 1, removes),
        DiffLine::Remove(_) => (adds, removes + 1),
        _ => (adds, removes),
    })
}

/// Compare by lines only: CRLF and a missing final newline are not changes
fn normalize_lines(text: &str) -> String {
    text.lines().fold(String::with_capacity(text.len() + 1), |mut out, line| {
        out.push_str(line);
        out.push('\n');
        out
    })
}
