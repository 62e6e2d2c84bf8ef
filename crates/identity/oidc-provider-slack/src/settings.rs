//! Loading Slack app credentials.
//!
//! Settings come from an optional TOML file and `SLACK_`-prefixed environment
//! variables (`SLACK_CLIENT_ID`, `SLACK_CLIENT_SECRET`, `SLACK_REDIRECT_URI`,
//! `SLACK_STATE_TTL_SECONDS`, `SLACK_HTTP_TIMEOUT_SECONDS`). Environment
//! variables take precedence over file values.

use crate::error::SettingsError;
use config::{Config, Environment, File};
use oidc_oauth2_client::OAuth2ClientConfig;
use std::path::Path;

pub const ENV_PREFIX: &str = "SLACK";

pub fn load_client_config(path: Option<&Path>) -> Result<OAuth2ClientConfig, SettingsError> {
    load(path, Environment::with_prefix(ENV_PREFIX))
}

fn load(
    path: Option<&Path>,
    environment: Environment,
) -> Result<OAuth2ClientConfig, SettingsError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }

    let settings = builder.add_source(environment).build()?;

    Ok(settings.try_deserialize::<OAuth2ClientConfig>()?)
}
