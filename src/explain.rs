//! One explain action, end to end
//!
//! Input is validated before anything leaves the machine. Highlights are
//! computed locally, the completion service is called once, and the answer is
//! decoded. Only a fully decoded answer becomes a [`HistoryEntry`]; the caller
//! appends it to its own session history.

use crate::analysis::analyze_sample;
use crate::decode::decode_with_stage;
use crate::error::ExplainError;
use crate::history::HistoryEntry;
use crate::llm::{explanation_prompt, CompletionService, Usage};
use crate::sample::{CodeSample, Language};

/// A successful action, ready to go into history
#[derive(Debug, Clone)]
pub struct Explanation {
    pub entry: HistoryEntry,
    pub usage: Option<Usage>,
}

/// Runs explain actions against a completion service with a fixed model
pub struct Explainer<S> {
    service: S,
    model: String,
}

impl<S: CompletionService> Explainer<S> {
    pub fn new(service: S, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate raw form input, then explain it
    pub async fn explain_input(
        &self,
        source: &str,
        language: Language,
    ) -> Result<Explanation, ExplainError> {
        let sample = CodeSample::new(source, language)?;
        self.explain(sample).await
    }

    /// Explain a sample: analyze, request, decode
    pub async fn explain(&self, sample: CodeSample) -> Result<Explanation, ExplainError> {
        let highlights = analyze_sample(&sample);
        tracing::debug!(
            language = %sample.language(),
            functions = highlights.functions.len(),
            loops = highlights.loops.len(),
            conditions = highlights.conditions.len(),
            "static analysis done"
        );

        let prompt = explanation_prompt(&sample);
        let completion = self
            .service
            .request_explanation(&prompt, &self.model)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "completion service error"))?;

        let Some((result, stage)) = decode_with_stage(&completion.content) else {
            tracing::warn!(
                response_chars = completion.content.chars().count(),
                "no structured record recoverable from model output"
            );
            return Err(ExplainError::Decode {
                raw: completion.content,
            });
        };
        tracing::debug!(stage = stage.label(), "model output decoded");

        Ok(Explanation {
            entry: HistoryEntry::new(sample, highlights, result),
            usage: completion.usage,
        })
    }
}
