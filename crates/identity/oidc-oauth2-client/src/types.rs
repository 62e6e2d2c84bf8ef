//! OAuth2 protocol types.

use crate::error::{OAuth2Error, OAuth2Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Decoded response body as handed to provider adapters.
pub type ResponseBody = serde_json::Map<String, Value>;

/// Expiry values above this are absolute timestamps rather than lifetimes
/// (2013-01-27, the publication date of the final OAuth2 draft).
const EXPIRATION_TIMESTAMP_THRESHOLD: i64 = 1_359_331_200;

/// Options for building an authorization URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationOptions {
    /// Overrides the provider's default scopes when set.
    pub scopes: Option<Vec<String>>,
    /// Explicit state value; a random one is generated when absent.
    pub state: Option<String>,
    /// Overrides the configured redirect URI.
    pub redirect_uri: Option<String>,
    pub additional_params: HashMap<String, String>,
}

/// Authorization URL to redirect the user to, with the state that was issued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Query parameters received on the redirect URI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    #[serde(default)]
    pub code: String,
    pub state: String,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Raw HTTP response kept alongside provider failures
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Decodes the body as form data when the content type says so, as JSON otherwise.
    ///
    /// A JSON body must be an object.
    pub fn decode_body(&self) -> OAuth2Result<ResponseBody> {
        let is_form = self
            .content_type()
            .is_some_and(|content_type| content_type.contains("urlencoded"));

        if is_form {
            return Ok(url::form_urlencoded::parse(self.body.as_bytes())
                .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
                .collect());
        }

        match serde_json::from_str::<Value>(&self.body)? {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))
            .into()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Access credential issued by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires: Option<DateTime<Utc>>,
    pub resource_owner_id: Option<String>,
    /// Everything else the token endpoint returned (`token_type`, `id_token`, ...).
    pub values: ResponseBody,
}

impl AccessToken {
    /// Builds a token from a decoded token response.
    ///
    /// `resource_owner_id_key` names the field holding the owner's id, for
    /// providers that return one with the token.
    pub fn from_response(
        mut response: ResponseBody,
        resource_owner_id_key: Option<&str>,
    ) -> OAuth2Result<Self> {
        let access_token = match response.remove("access_token") {
            Some(Value::String(token)) if !token.is_empty() => token,
            _ => {
                return Err(OAuth2Error::InvalidTokenResponse(
                    "missing access_token".to_string(),
                ));
            }
        };

        let refresh_token = response.remove("refresh_token").and_then(scalar_to_string);

        let expires = if let Some(expires_in) = response.remove("expires_in") {
            let expires = scalar_to_i64(&expires_in).and_then(expires_after);
            Some(expires.ok_or_else(|| {
                OAuth2Error::InvalidTokenResponse("invalid expires_in".to_string())
            })?)
        } else if let Some(expires) = response.remove("expires") {
            let expires = scalar_to_i64(&expires).and_then(|value| {
                if value > EXPIRATION_TIMESTAMP_THRESHOLD {
                    DateTime::from_timestamp(value, 0)
                } else {
                    expires_after(value)
                }
            });
            Some(expires.ok_or_else(|| {
                OAuth2Error::InvalidTokenResponse("invalid expires".to_string())
            })?)
        } else {
            None
        };

        let resource_owner_id = resource_owner_id_key
            .and_then(|key| response.remove(key))
            .and_then(scalar_to_string);

        Ok(Self {
            access_token,
            refresh_token,
            expires,
            resource_owner_id,
            values: response,
        })
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }

    pub fn has_expired(&self) -> bool {
        self.expires.is_some_and(|expires| expires <= Utc::now())
    }
}

fn expires_after(seconds: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(seconds).and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
