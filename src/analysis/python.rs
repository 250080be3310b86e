//! Tree-sitter based highlights for Python

use super::StaticHighlights;
use std::cell::RefCell;
use tree_sitter::{Node, Parser};

thread_local! {
    static PYTHON_PARSER: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        // Ignore error here - parse() returns None if the language failed to load
        let _ = p.set_language(&tree_sitter_python::LANGUAGE.into());
        p
    });
}

pub(super) fn analyze(source: &str) -> StaticHighlights {
    let Some(tree) = PYTHON_PARSER.with(|p| p.borrow_mut().parse(source, None)) else {
        tracing::debug!("python parser produced no tree");
        return StaticHighlights::default();
    };

    let root = tree.root_node();
    if root.has_error() {
        // Partial trees are misleading; treat syntax errors like a failed parse
        tracing::debug!("python source has syntax errors, skipping highlights");
        return StaticHighlights::default();
    }

    let mut highlights = StaticHighlights::default();
    collect(root, source.as_bytes(), &mut highlights);
    highlights
}

/// Pre-order walk driven by the cursor alone, so nesting depth never
/// touches the call stack
fn collect(root: Node, source: &[u8], out: &mut StaticHighlights) {
    let mut cursor = root.walk();
    loop {
        record(&cursor.node(), source, out);

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn record(node: &Node, source: &[u8], out: &mut StaticHighlights) {
    let line = node.start_position().row + 1;
    match node.kind() {
        "function_definition" => {
            if let Some(name) = node
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source).ok())
            {
                out.functions.push(name.to_string());
            }
        }
        "for_statement" | "while_statement" => out.loops.push(line),
        // `elif` is a nested `if` in Python's own grammar
        "if_statement" | "elif_clause" => out.conditions.push(line),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_each() {
        let source = "def first_positive(xs):\n    for x in xs:\n        if x > 0:\n            return x\n    return None\n";
        let highlights = analyze(source);
        assert_eq!(highlights.functions, vec!["first_positive"]);
        assert_eq!(highlights.loops, vec![2]);
        assert_eq!(highlights.conditions, vec![3]);
    }

    #[test]
    fn test_document_order_with_nesting() {
        let source = "\
import math

class Shape:
    def area(self):
        return 0

def outer(n):
    def inner(k):
        while k:
            k -= 1
        return k
    if n > 1:
        pass
    elif n == 1:
        pass
    for i in range(n):
        inner(i)
";
        let highlights = analyze(source);
        assert_eq!(highlights.functions, vec!["area", "outer", "inner"]);
        assert_eq!(highlights.loops, vec![9, 16]);
        assert_eq!(highlights.conditions, vec![12, 14]);
    }

    #[test]
    fn test_async_and_decorated_functions() {
        let source = "@cache\ndef a():\n    pass\n\nasync def b():\n    pass\n";
        assert_eq!(analyze(source).functions, vec!["a", "b"]);
    }

    #[test]
    fn test_comprehensions_and_ternaries_are_not_statements() {
        let source = "ys = [x for x in range(3) if x]\nz = 1 if ys else 2\n";
        let highlights = analyze(source);
        assert!(highlights.loops.is_empty());
        assert!(highlights.conditions.is_empty());
    }

    #[test]
    fn test_syntax_error_gives_empty_highlights() {
        let highlights = analyze("def broken(:\n    for\n");
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_deep_nesting_on_a_small_stack() {
        let depth = 20_000;
        let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || analyze(&source))
            .unwrap();
        let highlights = handle.join().unwrap();
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_empty_source() {
        assert!(analyze("").is_empty());
    }
}
