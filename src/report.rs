//! Plain-text rendering of an explained entry, for one-shot runs

use crate::analysis::StaticHighlights;
use crate::decode::ComplexityEstimate;
use crate::diff::render_diff;
use crate::history::HistoryEntry;
use std::fmt::Write;

/// Human-readable lines describing the highlights
pub fn highlight_lines(highlights: &StaticHighlights) -> Vec<String> {
    vec![
        format!("functions:  {}", join_or_none(&highlights.functions)),
        format!("loops:      {}", lines_or_none(&highlights.loops)),
        format!("conditions: {}", lines_or_none(&highlights.conditions)),
    ]
}

pub fn complexity_lines(complexity: &ComplexityEstimate) -> Vec<String> {
    vec![
        format!("time:  {}", or_dash(&complexity.time)),
        format!("space: {}", or_dash(&complexity.space)),
    ]
}

/// Every pane of an entry, one titled section after another
pub fn render_entry(entry: &HistoryEntry) -> String {
    let mut out = String::new();
    let lang = entry.sample.language();
    let result = &entry.result;

    section(&mut out, &format!("Original Code ({})", lang.tag()));
    out.push_str(entry.sample.source().trim_end());
    out.push('\n');

    section(&mut out, "Static Highlights");
    for line in highlight_lines(&entry.highlights) {
        let _ = writeln!(out, "{}", line);
    }

    section(&mut out, "Explanation");
    let _ = writeln!(out, "{}", or_dash(result.explanation.trim()));

    section(&mut out, &format!("Optimized Code ({})", lang.tag()));
    let _ = writeln!(out, "{}", or_dash(result.optimized_code.trim_end()));

    section(&mut out, "Diff (Original → Optimized)");
    let _ = writeln!(
        out,
        "{}",
        render_diff(entry.sample.source(), &result.optimized_code)
    );

    section(&mut out, "Time & Space Complexity");
    for line in complexity_lines(&result.complexity) {
        let _ = writeln!(out, "{}", line);
    }

    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "── {} ──", title);
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn lines_or_none(lines: &[usize]) -> String {
    if lines.is_empty() {
        "(none)".to_string()
    } else {
        lines
            .iter()
            .map(|l| format!("line {}", l))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "—"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ExplanationRecord;
    use crate::diff::NO_CHANGES;
    use crate::sample::{CodeSample, Language};

    #[test]
    fn test_highlight_lines() {
        let highlights = StaticHighlights {
            functions: vec!["a".into(), "b".into()],
            loops: vec![3],
            conditions: vec![],
        };
        assert_eq!(
            highlight_lines(&highlights),
            vec![
                "functions:  a, b",
                "loops:      line 3",
                "conditions: (none)",
            ]
        );
    }

    #[test]
    fn test_render_entry_sections() {
        let source = "def f():\n    return 1\n";
        let entry = HistoryEntry::new(
            CodeSample::new(source, Language::Python).unwrap(),
            StaticHighlights {
                functions: vec!["f".into()],
                ..StaticHighlights::default()
            },
            ExplanationRecord {
                explanation: "Returns one.".into(),
                optimized_code: source.into(),
                complexity: ComplexityEstimate {
                    time: "O(1)".into(),
                    space: "O(1)".into(),
                },
            },
        );

        let text = render_entry(&entry);
        assert!(text.starts_with("── Original Code (python) ──\ndef f():"));
        assert!(text.contains("── Explanation ──\nReturns one.\n"));
        assert!(text.contains(&format!("── Diff (Original → Optimized) ──\n{}\n", NO_CHANGES)));
        assert!(text.contains("time:  O(1)\nspace: O(1)\n"));
        assert!(text.contains("functions:  f"));
    }

    #[test]
    fn test_missing_fields_render_as_dash() {
        let complexity = ComplexityEstimate::default();
        assert_eq!(complexity_lines(&complexity), vec!["time:  —", "space: —"]);
    }
}
