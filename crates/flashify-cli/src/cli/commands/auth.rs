//! Auth commands: login, signup, logout, whoami.

use anyhow::{Context, Result, bail};
use flashify_core::api::ApiClient;
use flashify_core::auth::AuthSession;
use flashify_core::config::Config;
use flashify_core::credentials::CredentialStore;

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    let api = ApiClient::new(config)?;
    let mut auth = AuthSession::initialize(CredentialStore::new()).context("read credentials")?;

    let response = auth.login(&api, email, password).await?;
    if let Some(error) = response.error {
        bail!("{error}");
    }
    if !auth.is_authenticated() {
        bail!("Login did not return a session.");
    }

    let who = auth
        .user()
        .map_or_else(|| email.to_string(), |user| user.email.clone());
    println!("Logged in as {who}.");
    Ok(())
}

pub async fn signup(config: &Config, email: &str, password: &str) -> Result<()> {
    let api = ApiClient::new(config)?;
    let auth = AuthSession::initialize(CredentialStore::new()).context("read credentials")?;

    let response = auth.signup(&api, email, password).await?;
    if let Some(error) = response.error {
        bail!("{error}");
    }

    println!("Account created. Check your email for confirmation mail.");
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut auth = AuthSession::initialize(CredentialStore::new()).context("read credentials")?;
    auth.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let auth = AuthSession::initialize(CredentialStore::new()).context("read credentials")?;
    let Some(token) = auth.token() else {
        bail!("Not logged in. Run `flashify login` first.");
    };

    let api = ApiClient::new(config)?;
    let response = api.get_user(token).await?;
    match response.user {
        Some(user) => {
            println!("{} ({})", user.email, user.id);
            Ok(())
        }
        None => bail!(
            "{}",
            response.error.unwrap_or_else(|| "Invalid token".to_string())
        ),
    }
}
