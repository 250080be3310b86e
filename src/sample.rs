//! Submitted code samples

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages the form offers (the selector has exactly these two)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[value(alias = "py")]
    Python,
    #[value(name = "javascript", alias = "js")]
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Python, Language::JavaScript];

    /// Display name, also interpolated into the prompt
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
        }
    }

    /// Lowercase tag used for code blocks
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
        }
    }

    /// The other option in the selector
    pub fn toggle(&self) -> Self {
        match self {
            Language::Python => Language::JavaScript,
            Language::JavaScript => Language::Python,
        }
    }

    /// Guess the language from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "py" | "pyw" => Some(Language::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source text plus its declared language. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSample {
    source: String,
    language: Language,
}

impl CodeSample {
    /// Build a sample, rejecting empty or whitespace-only source
    pub fn new(source: impl Into<String>, language: Language) -> Result<Self, InputError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(InputError::EmptySource);
        }
        Ok(Self { source, language })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_source_is_rejected() {
        assert_eq!(
            CodeSample::new("  \n\t  ", Language::Python),
            Err(InputError::EmptySource)
        );
        assert_eq!(CodeSample::new("", Language::JavaScript), Err(InputError::EmptySource));
    }

    #[test]
    fn test_source_is_kept_verbatim() {
        let sample = CodeSample::new("  x = 1\n", Language::Python).unwrap();
        assert_eq!(sample.source(), "  x = 1\n");
        assert_eq!(sample.language(), Language::Python);
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path(Path::new("a/b.py")), Some(Language::Python));
        assert_eq!(Language::from_path(Path::new("app.MJS")), Some(Language::JavaScript));
        assert_eq!(Language::from_path(Path::new("main.rs")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_toggle_cycles_both_options() {
        assert_eq!(Language::Python.toggle(), Language::JavaScript);
        assert_eq!(Language::Python.toggle().toggle(), Language::Python);
    }
}
