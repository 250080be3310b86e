//! Error taxonomy for a single explain action
//!
//! Every variant is terminal for the current action only. The session keeps
//! running and history is left untouched.

use thiserror::Error;

/// The submitted sample was rejected before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter some code.")]
    EmptySource,
}

/// The completion service could not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Request timed out after {secs}s. Please try again.")]
    Timeout { secs: u64 },

    #[error("Could not connect to the completion service: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid API key (HTTP 401). Check GROQ_API_KEY.")]
    Unauthorized,

    #[error("Rate limited by the completion service (HTTP 429). Try again in a moment.")]
    RateLimited,

    #[error("Completion service error ({status}). The service may be temporarily unavailable.")]
    Server { status: u16 },

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse completion response: {0}")]
    MalformedResponse(String),

    #[error("Completion service returned an empty response")]
    EmptyResponse,
}

/// Why an explain action failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("API error: {0}")]
    Service(#[from] ServiceError),

    /// The service answered but no structured record could be recovered.
    /// `raw` is kept so the user can see what the model actually said.
    #[error("AI returned invalid JSON")]
    Decode { raw: String },
}

impl ExplainError {
    /// Raw model output, if this is a decode failure
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            ExplainError::Decode { raw } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_wraps_message() {
        let err: ExplainError = ServiceError::Transport("dns failure".into()).into();
        assert_eq!(err.to_string(), "API error: Request failed: dns failure");
        assert!(err.raw_output().is_none());
    }

    #[test]
    fn test_decode_error_keeps_raw_text() {
        let err = ExplainError::Decode {
            raw: "not json at all".into(),
        };
        assert_eq!(err.raw_output(), Some("not json at all"));
        assert_eq!(err.to_string(), "AI returned invalid JSON");
    }

    #[test]
    fn test_input_error_is_transparent() {
        let err: ExplainError = InputError::EmptySource.into();
        assert_eq!(err.to_string(), "Please enter some code.");
    }
}
