//! GitHub Models completion client.
//!
//! Calls the OpenAI-compatible `chat/completions` route with a bearer token.
//! Single attempt per call. No total timeout is set on the client, so a
//! stalled upstream holds the request open.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionConfig, CompletionError, CompletionProvider};
use crate::history::Message;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Option<Vec<Option<Choice>>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if present and non-empty.
    fn into_reply(self) -> Option<String> {
        self.choices?
            .into_iter()
            .next()
            .flatten()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.is_empty())
    }
}

/// Parse a `chat/completions` response body into the first reply.
fn parse_reply(body: &str) -> Result<Option<String>, CompletionError> {
    let data: CompletionResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Decode(e.to_string()))?;
    Ok(data.into_reply())
}

/// Completion provider backed by the GitHub Models inference API.
#[derive(Clone, Debug)]
pub struct GitHubModelsClient {
    client: Client,
    config: CompletionConfig,
}

impl GitHubModelsClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use a preconfigured reqwest client.
    pub fn with_client(client: Client, config: CompletionConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl CompletionProvider for GitHubModelsClient {
    async fn complete(&self, messages: &[Message]) -> Result<Option<String>, CompletionError> {
        let url = self.config.completions_url();
        debug!(%url, model = %self.config.model, messages = messages.len(), "requesting completion");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .json(&CompletionRequest {
                model: &self.config.model,
                messages,
                temperature: self.config.temperature,
                top_p: self.config.top_p,
            })
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_reply(&body)
    }
}
