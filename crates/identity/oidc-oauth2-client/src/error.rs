//! OAuth2 error types.

use thiserror::Error;

pub type OAuth2Result<T> = Result<T, OAuth2Error>;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("State not found or expired")]
    StateNotFound,

    #[error("Missing authorization code")]
    MissingAuthorizationCode,

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("User info request failed: {0}")]
    UserInfoFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("Callback error: {0}")]
    CallbackError(String),

    /// Failure reported by the identity provider itself, as detected by
    /// [`ProviderAdapter::check_response`](crate::ProviderAdapter::check_response).
    #[error(transparent)]
    Provider(Box<dyn std::error::Error + Send + Sync>),
}

impl OAuth2Error {
    /// Returns the adapter's typed failure when this is a provider error of type `E`.
    pub fn provider_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            OAuth2Error::Provider(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
