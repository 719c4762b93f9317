//! Completion module — outbound calls to the LLM completion API.
//!
//! # Public API
//!
//! - [`CompletionProvider`] — trait the relay calls for each chat turn
//! - [`github::GitHubModelsClient`] — OpenAI-compatible `chat/completions` client
//! - [`CompletionConfig`] — endpoint, model, token and sampling parameters

pub mod github;

use async_trait::async_trait;
use thiserror::Error;

use crate::history::Message;

/// Default completion API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://models.github.ai/inference";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

/// Errors that can occur while calling the completion API.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response parse error: {0}")]
    Decode(String),
}

/// Settings for the completion client.
#[derive(Clone, Debug)]
pub struct CompletionConfig {
    /// Base URL; `/chat/completions` is appended.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Bearer token.
    pub token: String,
    pub temperature: f32,
    pub top_p: f32,
}

impl CompletionConfig {
    /// Config with the default endpoint, model and sampling parameters.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            token: token.into(),
            temperature: 1.0,
            top_p: 1.0,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full URL of the `chat/completions` route.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

/// A service that turns a message list into a single reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a completion for `messages`.
    ///
    /// Returns `Ok(None)` when the API answered successfully but the first
    /// choice carried no usable content.
    async fn complete(&self, messages: &[Message]) -> Result<Option<String>, CompletionError>;
}
