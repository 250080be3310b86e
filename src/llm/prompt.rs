use crate::sample::CodeSample;

/// The one prompt this tool sends. Asks for strict JSON with the three
/// fields [`crate::decode::ExplanationRecord`] expects.
pub fn explanation_prompt(sample: &CodeSample) -> String {
    format!(
        r#"You must return ONLY valid JSON.

Explain this {language} code in 2–4 sentences.
Provide an optimized version.
Provide time & space complexity.

Return STRICT JSON:
{{
 "explanation": "...",
 "optimized_code": "...",
 "complexity": {{
     "time": "...",
     "space": "..."
 }}
}}
CODE:
{source}
"#,
        language = sample.language().name(),
        source = sample.source()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Language;

    #[test]
    fn test_prompt_interpolates_language_and_source() {
        let sample = CodeSample::new("console.log(1)", Language::JavaScript).unwrap();
        let prompt = explanation_prompt(&sample);
        assert!(prompt.starts_with("You must return ONLY valid JSON."));
        assert!(prompt.contains("Explain this JavaScript code in 2–4 sentences."));
        assert!(prompt.contains("\"optimized_code\": \"...\""));
        assert!(prompt.ends_with("CODE:\nconsole.log(1)\n"));
    }

    #[test]
    fn test_braces_in_source_are_not_format_args() {
        let sample = CodeSample::new("d = {'a': 1}", Language::Python).unwrap();
        assert!(explanation_prompt(&sample).contains("d = {'a': 1}"));
    }
}
