//! Regex scan for JavaScript function names
//!
//! Two alternatives: `function name` declarations, and `name = (` assignments
//! (arrow functions, function expressions). Anything shaped like `x = (a + b)`
//! is reported too. Loops and conditionals are not scanned.

use super::StaticHighlights;
use regex::Regex;
use std::sync::OnceLock;

const FUNCTION_PATTERN: &str = r"(?:function\s+([A-Za-z0-9_]+))|([A-Za-z0-9_]+)\s*=\s*\(";

static FUNCTION_RE: OnceLock<Option<Regex>> = OnceLock::new();

pub(super) fn analyze(source: &str) -> StaticHighlights {
    let Some(re) = FUNCTION_RE
        .get_or_init(|| Regex::new(FUNCTION_PATTERN).ok())
        .as_ref()
    else {
        return StaticHighlights::default();
    };

    let functions = re
        .captures_iter(source)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    StaticHighlights {
        functions,
        ..StaticHighlights::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_and_arrows_in_order() {
        let source = "\
function load(url) { return fetch(url); }
const parse = (text) => JSON.parse(text);
let render = (node) => {
  for (const child of node.children) { render(child); }
};
";
        let highlights = analyze(source);
        assert_eq!(highlights.functions, vec!["load", "parse", "render"]);
        assert!(highlights.loops.is_empty());
        assert!(highlights.conditions.is_empty());
    }

    #[test]
    fn test_parenthesized_assignment_is_a_known_false_positive() {
        let highlights = analyze("total = (a + b) * 2;");
        assert_eq!(highlights.functions, vec!["total"]);
    }

    #[test]
    fn test_function_expression_without_parens_is_missed() {
        // `name = function () {}` only matches through the anonymous keyword,
        // which has no name to capture.
        let highlights = analyze("const handler = function () {};");
        assert!(highlights.functions.is_empty());
    }

    #[test]
    fn test_malformed_source_never_fails() {
        assert!(analyze("}{ (( function").is_empty());
    }
}
