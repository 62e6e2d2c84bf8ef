//! Example showing how to sign users in with Slack
//!
//! This example demonstrates:
//! 1. Loading Slack app credentials from `slack.toml` / `SLACK_*` variables
//! 2. Generating the authorization URL
//! 3. Exchanging the returned code for an access token
//! 4. Reading the user's profile
//!
//! Run it once to get the URL, approve the app in the browser, then run it
//! again with `SLACK_CODE` copied from the redirect. The second run uses a
//! fresh in-memory state store, so it calls `access_token` directly instead of
//! `handle_callback`.

use anyhow::Context;
use oidc_provider_slack::{AuthorizationOptions, SlackProvider, load_client_config};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings_file = Path::new("slack.toml");
    let config = load_client_config(settings_file.exists().then_some(settings_file))
        .context("Set SLACK_CLIENT_ID, SLACK_CLIENT_SECRET and SLACK_REDIRECT_URI")?;

    let client = SlackProvider::in_memory_client(config)?;

    let Ok(code) = std::env::var("SLACK_CODE") else {
        let request = client
            .authorization_url(AuthorizationOptions::default())
            .await?;

        println!("Open this URL to sign in with Slack:\n\n  {}\n", request.url);
        println!("Then rerun with SLACK_CODE=<code> (state: {})", request.state);
        return Ok(());
    };

    let token = client.access_token(&code).await?;
    info!("Received access token");

    let user = client.resource_owner(&token).await?;

    println!("Signed in as {}", user.name().unwrap_or("<no name>"));
    println!("  user id:  {}", user.id().unwrap_or("-"));
    println!("  team:     {}", user.team_name().unwrap_or("-"));
    println!("  email:    {}", user.email().unwrap_or("-"));
    println!(
        "  verified: {}",
        user.is_email_verified().unwrap_or_default()
    );

    Ok(())
}
