use crate::error::ExplainError;
use crate::explain::Explanation;

/// Messages from background tasks to the main UI thread
#[derive(Debug)]
pub enum BackgroundMessage {
    /// Decoded answer, ready to go into history
    ExplanationReady(Explanation),
    /// Input, service or decode failure; history is untouched
    ExplanationFailed(ExplainError),
    /// A background task panicked
    Error(String),
}
