//! "Sign in with Slack" (OpenID Connect) for [`oidc_oauth2_client`].
//!
//! [`SlackProvider`] plugs Slack's endpoints, default scopes and `"ok": false`
//! error convention into the generic [`OAuth2Client`](oidc_oauth2_client::OAuth2Client);
//! [`SlackResourceOwner`] exposes the returned profile through typed accessors.

mod error;
mod provider;
mod resource_owner;
mod settings;

#[cfg(test)]
mod tests;

pub use error::{SettingsError, SlackProviderError};
pub use provider::{
    AUTHORIZATION_URL, DEFAULT_SCOPES, SlackClient, SlackProvider, TOKEN_URL, USER_INFO_URL,
};
pub use resource_owner::{SlackResourceOwner, claims};
pub use settings::{ENV_PREFIX, load_client_config};

// Re-export common types for convenience
pub use oidc_oauth2_client::{
    AccessToken, AuthorizationOptions, AuthorizationRequest, AuthorizationResponse, OAuth2Client,
    OAuth2ClientConfig, OAuth2Error, OAuth2Result,
};
