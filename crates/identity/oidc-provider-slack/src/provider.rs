//! Slack OpenID Connect endpoints and response checks.

use crate::error::SlackProviderError;
use crate::resource_owner::SlackResourceOwner;
use oidc_oauth2_client::{
    AccessToken, InMemoryStateStore, OAuth2Client, OAuth2ClientConfig, OAuth2Result,
    OAuth2StateStore, ProviderAdapter, ResponseBody, TransportResponse,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub const AUTHORIZATION_URL: &str = "https://slack.com/openid/connect/authorize";
pub const TOKEN_URL: &str = "https://slack.com/api/openid.connect.token";
pub const USER_INFO_URL: &str = "https://slack.com/api/openid.connect.userInfo";

pub const DEFAULT_SCOPES: [&str; 2] = ["openid", "profile"];

pub type SlackClient = OAuth2Client<SlackProvider>;

/// "Sign in with Slack" provider adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackProvider;

impl SlackProvider {
    /// Client for this provider backed by the given state store.
    pub fn client(
        config: OAuth2ClientConfig,
        state_store: Arc<dyn OAuth2StateStore>,
    ) -> OAuth2Result<SlackClient> {
        OAuth2Client::new(config, SlackProvider, state_store)
    }

    /// Client for this provider keeping issued states in memory.
    pub fn in_memory_client(config: OAuth2ClientConfig) -> OAuth2Result<SlackClient> {
        Self::client(config, Arc::new(InMemoryStateStore::new()))
    }
}

impl ProviderAdapter for SlackProvider {
    type Error = SlackProviderError;
    type Owner = SlackResourceOwner;

    fn base_authorization_url(&self) -> String {
        AUTHORIZATION_URL.to_string()
    }

    fn base_access_token_url(&self, _params: &HashMap<String, String>) -> String {
        TOKEN_URL.to_string()
    }

    fn resource_owner_details_url(&self, _token: &AccessToken) -> String {
        USER_INFO_URL.to_string()
    }

    fn default_scopes(&self) -> Vec<String> {
        DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect()
    }

    /// Slack answers `200 OK` or an error status with `{"ok": false, "error": "..."}`;
    /// only a literal `false` counts as a failure.
    fn check_response(
        &self,
        response: &TransportResponse,
        data: &ResponseBody,
    ) -> Result<(), Self::Error> {
        match data.get("ok") {
            Some(Value::Bool(false)) => {
                let error = data
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Err(SlackProviderError::from_response(response.clone(), error))
            }
            _ => Ok(()),
        }
    }

    fn create_resource_owner(
        &self,
        response: ResponseBody,
        _token: &AccessToken,
    ) -> SlackResourceOwner {
        SlackResourceOwner::new(response)
    }
}
