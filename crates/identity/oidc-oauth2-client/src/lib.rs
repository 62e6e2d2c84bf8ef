//! Generic OAuth2 authorization code client.
//!
//! The flow itself (authorization URL with CSRF state, code exchange, profile
//! fetch) lives in [`OAuth2Client`]. Everything provider specific, from the
//! endpoint URLs to how errors are reported and how the profile is exposed,
//! comes from a [`ProviderAdapter`] implementation.

mod client;
mod config;
mod error;
mod provider;
mod state;
mod types;


pub use client::OAuth2Client;
pub use config::OAuth2ClientConfig;
pub use error::{OAuth2Error, OAuth2Result};
pub use provider::{ProviderAdapter, ResourceOwner};
pub use state::{InMemoryStateStore, OAuth2State, OAuth2StateStore};
pub use types::{
    AccessToken, AuthorizationOptions, AuthorizationRequest, AuthorizationResponse, ResponseBody,
    TransportResponse,
};
