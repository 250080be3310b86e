//! Completion service adapter
//!
//! One request per explain action: the fixed prompt goes out, raw text comes
//! back. No retries, no streaming, explicit timeout.

mod client;
mod models;
mod prompt;

pub use client::{CompletionClient, CompletionService};
pub use models::{Completion, Usage};
pub use prompt::explanation_prompt;
