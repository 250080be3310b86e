use super::models::{Completion, Usage};
use crate::config::{ApiKey, Config};
use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Maximum characters of an error body shown to the user
const MAX_ERROR_CONTENT_LEN: usize = 300;

/// Anything that can turn a prompt into raw model text.
///
/// [`CompletionClient`] is the real implementation; tests script their own.
pub trait CompletionService: Send + Sync {
    fn request_explanation(
        &self,
        prompt: &str,
        model: &str,
    ) -> impl Future<Output = Result<Completion, ServiceError>> + Send;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
    temperature: f32,
    timeout_secs: u64,
}

impl CompletionClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = create_http_client(config.timeout_secs)?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }

    async fn send(&self, prompt: &str, model: &str) -> Result<Completion, ServiceError> {
        let request = ChatRequest {
            model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            stream: false,
        };

        tracing::info!(
            model,
            endpoint = %self.endpoint,
            prompt_chars = prompt.chars().count(),
            "sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_secs))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "completion request failed");
            return Err(status_error(status.as_u16(), &text));
        }

        let completion = parse_chat_response(&text)?;
        tracing::info!(
            model = %completion.model,
            tokens = completion.total_tokens(),
            response_chars = completion.content.chars().count(),
            "completion received"
        );
        Ok(completion)
    }
}

impl CompletionService for CompletionClient {
    async fn request_explanation(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<Completion, ServiceError> {
        self.send(prompt, model).await
    }
}

/// Create a configured HTTP client with an explicit request timeout
pub(crate) fn create_http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))
}

fn parse_chat_response(text: &str) -> Result<Completion, ServiceError> {
    let parsed: ChatResponse = serde_json::from_str(text)
        .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(ServiceError::EmptyResponse)?;

    Ok(Completion {
        content: content.trim().to_string(),
        usage: parsed.usage,
        model: parsed.model.unwrap_or_default(),
    })
}

fn status_error(status: u16, body: &str) -> ServiceError {
    match status {
        401 => ServiceError::Unauthorized,
        429 => ServiceError::RateLimited,
        500..=599 => ServiceError::Server { status },
        _ => ServiceError::Status {
            status,
            body: sanitize_api_response(body),
        },
    }
}

fn map_transport_error(err: reqwest::Error, timeout_secs: u64) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout { secs: timeout_secs }
    } else if err.is_connect() {
        ServiceError::Connect(err.to_string())
    } else {
        ServiceError::Transport(err.to_string())
    }
}

/// Truncate an error body and drop it entirely if it looks like it echoes
/// credentials back
fn sanitize_api_response(content: &str) -> String {
    const SECRET_PATTERNS: &[&str] = &[
        "api_key",
        "apikey",
        "secret",
        "password",
        "credential",
        "bearer",
        "gsk_", // Groq key prefix
        "sk-",
    ];

    let truncated = truncate_str(content.trim(), MAX_ERROR_CONTENT_LEN);
    let lower = truncated.to_lowercase();
    if SECRET_PATTERNS.iter().any(|p| lower.contains(p)) {
        return "(response details redacted - may contain sensitive data)".to_string();
    }
    truncated.to_string()
}

/// Truncate a string for display (Unicode-safe)
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}
