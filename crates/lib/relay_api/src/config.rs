//! API server configuration.

use relay_core::completion::CompletionConfig;
use thiserror::Error;

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN missing")]
    MissingToken,
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8787").
    pub bind_addr: String,
    /// Completion API settings.
    pub completion: CompletionConfig,
}

impl ApiConfig {
    /// Build the config, failing if no usable token was supplied.
    pub fn new(host: &str, port: u16, token: Option<String>) -> Result<Self, ConfigError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;
        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            completion: CompletionConfig::new(token),
        })
    }
}
