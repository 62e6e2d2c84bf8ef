//! OAuth2 authorization code flow, driven by a [`ProviderAdapter`].

use crate::config::OAuth2ClientConfig;
use crate::error::{OAuth2Error, OAuth2Result};
use crate::provider::{ProviderAdapter, ResourceOwner};
use crate::state::{OAuth2State, OAuth2StateStore};
use crate::types::{
    AccessToken, AuthorizationOptions, AuthorizationRequest, AuthorizationResponse, ResponseBody,
    TransportResponse,
};
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// OAuth2 client for one provider
pub struct OAuth2Client<P> {
    http_client: Client,
    config: OAuth2ClientConfig,
    provider: Arc<P>,
    state_store: Arc<dyn OAuth2StateStore>,
}

impl<P> Clone for OAuth2Client<P> {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            config: self.config.clone(),
            provider: Arc::clone(&self.provider),
            state_store: Arc::clone(&self.state_store),
        }
    }
}

impl<P: ProviderAdapter> OAuth2Client<P> {
    pub fn new(
        config: OAuth2ClientConfig,
        provider: P,
        state_store: Arc<dyn OAuth2StateStore>,
    ) -> OAuth2Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            config,
            provider: Arc::new(provider),
            state_store,
        })
    }

    /// Replaces the HTTP transport, e.g. to share a connection pool.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &OAuth2ClientConfig {
        &self.config
    }

    /// Build the authorization URL and remember the issued state
    pub async fn authorization_url(
        &self,
        options: AuthorizationOptions,
    ) -> OAuth2Result<AuthorizationRequest> {
        let mut url = Url::parse(&self.provider.base_authorization_url())?;

        let scopes = options
            .scopes
            .unwrap_or_else(|| self.provider.default_scopes());
        let redirect_uri = options
            .redirect_uri
            .unwrap_or_else(|| self.config.redirect_uri.clone());

        let state = OAuth2State::new(
            options.state,
            redirect_uri.clone(),
            scopes.clone(),
            self.config.state_ttl_seconds,
        )?;
        let state_param = state.state.clone();
        self.state_store.store(state).await?;

        let mut params = url.query_pairs_mut();
        params.append_pair("response_type", "code");
        params.append_pair("client_id", &self.config.client_id);
        params.append_pair("redirect_uri", &redirect_uri);
        params.append_pair("state", &state_param);

        if !scopes.is_empty() {
            params.append_pair("scope", &scopes.join(self.provider.scope_separator()));
        }

        // `prompt` supersedes the legacy `approval_prompt`
        let extra = &options.additional_params;
        if !extra.contains_key("approval_prompt") && !extra.contains_key("prompt") {
            params.append_pair("approval_prompt", "auto");
        }

        for (key, value) in extra {
            params.append_pair(key, value);
        }

        drop(params);

        debug!(scopes = ?scopes, "Generated authorization URL");

        Ok(AuthorizationRequest {
            url: url.to_string(),
            state: state_param,
        })
    }

    /// Verify the callback state and exchange the code for an access token
    pub async fn handle_callback(
        &self,
        callback_response: AuthorizationResponse,
    ) -> OAuth2Result<AccessToken> {
        let state = self.state_store.retrieve(&callback_response.state).await?;

        if let Some(error) = &callback_response.error {
            let error_desc = callback_response
                .error_description
                .as_deref()
                .unwrap_or("No description");
            return Err(OAuth2Error::CallbackError(format!(
                "{}: {}",
                error, error_desc
            )));
        }

        if callback_response.code.is_empty() {
            return Err(OAuth2Error::MissingAuthorizationCode);
        }

        self.exchange_code(&callback_response.code, &state.redirect_uri)
            .await
    }

    /// Exchange an authorization code using the configured redirect URI
    pub async fn access_token(&self, code: &str) -> OAuth2Result<AccessToken> {
        if code.is_empty() {
            return Err(OAuth2Error::MissingAuthorizationCode);
        }

        self.exchange_code(code, &self.config.redirect_uri).await
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> OAuth2Result<AccessToken> {
        let mut params = HashMap::new();
        params.insert("grant_type".to_string(), "authorization_code".to_string());
        params.insert("code".to_string(), code.to_string());
        params.insert("client_id".to_string(), self.config.client_id.clone());
        params.insert("client_secret".to_string(), self.config.client_secret.clone());
        params.insert("redirect_uri".to_string(), redirect_uri.to_string());

        let token_url = self.provider.base_access_token_url(&params);

        let response = self
            .http_client
            .post(&token_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await?;

        let transport = read_response(response).await?;
        let data = match transport.decode_body() {
            Ok(data) => data,
            Err(_) if !transport.status.is_success() => {
                error!(status = %transport.status, "Token exchange failed: {}", transport.body);
                return Err(OAuth2Error::TokenExchangeFailed(transport.body));
            }
            Err(e) => return Err(e),
        };

        self.check_response(&transport, &data)?;

        if !transport.status.is_success() {
            error!(status = %transport.status, "Token exchange failed: {}", transport.body);
            return Err(OAuth2Error::TokenExchangeFailed(transport.body));
        }

        let token =
            AccessToken::from_response(data, self.provider.access_token_resource_owner_id())?;

        info!("Successfully exchanged code for tokens");
        Ok(token)
    }

    /// Fetch the authenticated user's profile
    pub async fn resource_owner(&self, token: &AccessToken) -> OAuth2Result<P::Owner> {
        let details_url = self.provider.resource_owner_details_url(token);

        let response = self
            .http_client
            .get(&details_url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token.token())
            .send()
            .await?;

        let transport = read_response(response).await?;
        let data = match transport.decode_body() {
            Ok(data) => data,
            Err(_) if !transport.status.is_success() => {
                error!(status = %transport.status, "User info request failed: {}", transport.body);
                return Err(OAuth2Error::UserInfoFailed(transport.body));
            }
            Err(e) => return Err(e),
        };

        self.check_response(&transport, &data)?;

        if !transport.status.is_success() {
            error!(status = %transport.status, "User info request failed: {}", transport.body);
            return Err(OAuth2Error::UserInfoFailed(transport.body));
        }

        let owner = self.provider.create_resource_owner(data, token);

        debug!(
            "Successfully retrieved resource owner: {}",
            owner.id().unwrap_or("<unknown>")
        );
        Ok(owner)
    }

    fn check_response(
        &self,
        transport: &TransportResponse,
        data: &ResponseBody,
    ) -> OAuth2Result<()> {
        self.provider.check_response(transport, data).map_err(|e| {
            error!(status = %transport.status, "Provider reported an error: {}", e);
            OAuth2Error::Provider(Box::new(e))
        })
    }
}

async fn read_response(response: reqwest::Response) -> OAuth2Result<TransportResponse> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await?;

    Ok(TransportResponse::new(status, headers, body))
}
