//! CLI command implementations.

pub mod auth;
pub mod config;
pub mod decks;

use anyhow::{Context, Result, bail};
use flashify_core::api::ApiClient;
use flashify_core::auth::AuthSession;
use flashify_core::config::Config;
use flashify_core::credentials::CredentialStore;

/// Builds an API client plus the stored bearer token for protected commands.
fn authed(config: &Config) -> Result<(ApiClient, String)> {
    let auth = AuthSession::initialize(CredentialStore::new()).context("read credentials")?;
    let Some(token) = auth.token() else {
        bail!("Not logged in. Run `flashify login` first.");
    };
    Ok((ApiClient::new(config)?, token.to_string()))
}
