//! Full-screen TUI for Flashify.

pub mod effects;
pub mod events;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod text;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use flashify_core::auth::AuthSession;
use flashify_core::config::Config;
use flashify_core::credentials::CredentialStore;
pub use runtime::TuiRuntime;

/// Runs the interactive Flashify TUI.
///
/// Rehydrates auth from the persisted credential slot, then hands control to
/// the runtime until the user quits. Must run inside a tokio runtime (API
/// calls are spawned as tasks).
pub async fn run(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The Flashify TUI requires a terminal.\n\
             Use the `flashify decks` / `flashify login` subcommands for scripting."
        );
    }

    let auth = AuthSession::initialize(CredentialStore::new())?;
    let mut runtime = TuiRuntime::new(config.clone(), auth)?;
    runtime.run()
}
