//! CLI entry and dispatch.
//!
//! With no subcommand, launches the interactive TUI. Subcommands cover the
//! same API surface for scripting: auth, deck management, config.

use anyhow::{Context, Result};
use clap::Parser;
use flashify_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "flashify")]
#[command(version = "0.1")]
#[command(about = "Terminal flashcard study tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and persist the session token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (or set FLASHIFY_PASSWORD)
        #[arg(long, env = "FLASHIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a new account (confirmation email follows)
    Signup {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (or set FLASHIFY_PASSWORD)
        #[arg(long, env = "FLASHIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the persisted session token
    Logout,

    /// Show the identity behind the stored token
    Whoami,

    /// Manage decks
    Decks {
        #[command(subcommand)]
        command: DeckCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum DeckCommands {
    /// Lists your decks
    List,
    /// Creates a deck
    Create {
        /// Deck name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Deletes a deck
    Delete {
        /// Deck id
        #[arg(value_name = "DECK_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let _log_guard = flashify_core::logging::init()?;

    // default to the interactive TUI
    let Some(command) = cli.command else {
        return flashify_tui::run(&config).await;
    };

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, &password).await
        }
        Commands::Signup { email, password } => {
            commands::auth::signup(&config, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => commands::auth::whoami(&config).await,

        Commands::Decks { command } => match command {
            DeckCommands::List => commands::decks::list(&config).await,
            DeckCommands::Create { name } => commands::decks::create(&config, &name).await,
            DeckCommands::Delete { id } => commands::decks::delete(&config, &id).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
