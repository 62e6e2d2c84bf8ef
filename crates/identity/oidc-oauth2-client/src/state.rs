//! OAuth2 state management for CSRF protection.

use crate::error::{OAuth2Error, OAuth2Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// State issued with an authorization redirect and consumed on callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2State {
    pub state: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OAuth2State {
    /// Creates a state record. A random UUID is used when `state` is `None`.
    ///
    /// Fails with `ConfigError` when `ttl_seconds` does not fit a timestamp.
    pub fn new(
        state: Option<String>,
        redirect_uri: String,
        scopes: Vec<String>,
        ttl_seconds: u64,
    ) -> OAuth2Result<Self> {
        let state = state.unwrap_or_else(|| Uuid::new_v4().to_string());
        let created_at = Utc::now();
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| created_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                OAuth2Error::ConfigError(format!("state TTL of {ttl_seconds}s is out of range"))
            })?;

        Ok(Self {
            state,
            redirect_uri,
            scopes,
            created_at,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Storage for issued states
#[async_trait]
pub trait OAuth2StateStore: Send + Sync {
    async fn store(&self, state: OAuth2State) -> OAuth2Result<()>;

    /// Remove and return a state. Unknown and expired states are both `StateNotFound`.
    async fn retrieve(&self, state: &str) -> OAuth2Result<OAuth2State>;

    async fn cleanup_expired(&self) -> OAuth2Result<usize>;
}

#[derive(Default)]
pub struct InMemoryStateStore {
    states: Arc<RwLock<HashMap<String, OAuth2State>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OAuth2StateStore for InMemoryStateStore {
    async fn store(&self, state: OAuth2State) -> OAuth2Result<()> {
        let mut states = self.states.write().await;
        states.insert(state.state.clone(), state);
        Ok(())
    }

    async fn retrieve(&self, state: &str) -> OAuth2Result<OAuth2State> {
        let mut states = self.states.write().await;

        let oauth_state = states.remove(state).ok_or(OAuth2Error::StateNotFound)?;

        if oauth_state.is_expired() {
            return Err(OAuth2Error::StateNotFound);
        }

        Ok(oauth_state)
    }

    async fn cleanup_expired(&self) -> OAuth2Result<usize> {
        let mut states = self.states.write().await;
        let before = states.len();
        let now = Utc::now();

        states.retain(|_, state| now <= state.expires_at);

        Ok(before - states.len())
    }
}
