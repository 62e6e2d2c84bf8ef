//! Capability interface implemented by concrete identity providers.

use crate::types::{AccessToken, ResponseBody, TransportResponse};
use std::collections::HashMap;

/// Authenticated user as returned by a provider's profile endpoint
pub trait ResourceOwner: Send + Sync {
    /// Provider-specific user identifier.
    fn id(&self) -> Option<&str>;

    /// The full profile payload.
    fn to_map(&self) -> &ResponseBody;
}

/// Everything [`OAuth2Client`](crate::OAuth2Client) needs to know about one provider.
///
/// Implementations describe endpoints and shape responses; they never perform I/O.
pub trait ProviderAdapter: Send + Sync {
    /// Failure reported by the provider inside an otherwise well-formed response.
    type Error: std::error::Error + Send + Sync + 'static;

    type Owner: ResourceOwner;

    fn base_authorization_url(&self) -> String;

    /// Token endpoint for a request carrying `params`.
    fn base_access_token_url(&self, params: &HashMap<String, String>) -> String;

    fn resource_owner_details_url(&self, token: &AccessToken) -> String;

    fn default_scopes(&self) -> Vec<String>;

    fn scope_separator(&self) -> &str {
        " "
    }

    /// Name of the token response field carrying the resource owner id, if any.
    fn access_token_resource_owner_id(&self) -> Option<&str> {
        None
    }

    /// Inspects a decoded response before the client uses it.
    fn check_response(
        &self,
        response: &TransportResponse,
        data: &ResponseBody,
    ) -> Result<(), Self::Error>;

    fn create_resource_owner(&self, response: ResponseBody, token: &AccessToken) -> Self::Owner;
}
