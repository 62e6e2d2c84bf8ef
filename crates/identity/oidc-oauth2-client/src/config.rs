//! OAuth2 client configuration types.

use serde::{Deserialize, Serialize};

fn default_state_ttl_seconds() -> u64 {
    600 // 10 minutes
}

fn default_http_timeout_seconds() -> u64 {
    30
}

/// Client credentials and flow settings held by [`OAuth2Client`](crate::OAuth2Client).
///
/// Endpoints and default scopes are not part of this struct; they come from the
/// [`ProviderAdapter`](crate::ProviderAdapter) the client is built with.
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    #[serde(default = "default_state_ttl_seconds")]
    pub state_ttl_seconds: u64,
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
}

impl std::fmt::Debug for OAuth2ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("state_ttl_seconds", &self.state_ttl_seconds)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .finish()
    }
}

impl OAuth2ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            state_ttl_seconds: default_state_ttl_seconds(),
            http_timeout_seconds: default_http_timeout_seconds(),
        }
    }

    pub fn with_state_ttl(mut self, seconds: u64) -> Self {
        self.state_ttl_seconds = seconds;
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }
}
