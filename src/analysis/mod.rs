//! Static highlights for submitted code
//!
//! A shallow, local summary shown next to the model's answer: function names,
//! and the lines where loops and conditionals start. Python gets a real
//! tree-sitter parse. JavaScript gets a regex scan that will both miss
//! constructs and report false positives; callers must not rely on it.
//!
//! Analysis never fails. Anything that cannot be parsed yields empty
//! highlights.

mod javascript;
mod python;

use crate::sample::{CodeSample, Language};
use serde::{Deserialize, Serialize};

/// Shallow structural facts about a sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticHighlights {
    /// Function names in declaration order
    pub functions: Vec<String>,
    /// 1-based start lines of `for`/`while` loops, in document order
    pub loops: Vec<usize>,
    /// 1-based start lines of conditionals, in document order
    pub conditions: Vec<usize>,
}

impl StaticHighlights {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.loops.is_empty() && self.conditions.is_empty()
    }
}

/// Analyze source text declared as `language`
pub fn analyze(source: &str, language: Language) -> StaticHighlights {
    match language {
        Language::Python => python::analyze(source),
        Language::JavaScript => javascript::analyze(source),
    }
}

/// Analyze a submitted sample
pub fn analyze_sample(sample: &CodeSample) -> StaticHighlights {
    analyze(sample.source(), sample.language())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_language() {
        let source = "def f():\n    pass\n";
        assert_eq!(analyze(source, Language::Python).functions, vec!["f"]);
        // `def` means nothing to the regex scan
        assert!(analyze(source, Language::JavaScript).is_empty());
    }

    #[test]
    fn test_analyze_sample() {
        let sample = CodeSample::new("function go() {}", Language::JavaScript).unwrap();
        assert_eq!(analyze_sample(&sample).functions, vec!["go"]);
    }
}
