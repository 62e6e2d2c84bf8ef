//! Slack error types.

use oidc_oauth2_client::TransportResponse;
use thiserror::Error;

/// Error reported by the Slack API through `"ok": false`
#[derive(Debug, Clone, Error)]
#[error("Slack API error: {error}")]
pub struct SlackProviderError {
    error: String,
    response: TransportResponse,
}

impl SlackProviderError {
    pub fn from_response(response: TransportResponse, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            response,
        }
    }

    /// Slack's error code, e.g. `not_authed` or `invalid_code`.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn response(&self) -> &TransportResponse {
        &self.response
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load Slack settings: {0}")]
    Config(#[from] config::ConfigError),
}
