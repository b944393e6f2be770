//! Deck commands.

use anyhow::Result;
use comfy_table::Table;
use flashify_core::config::Config;

use super::authed;

pub async fn list(config: &Config) -> Result<()> {
    let (api, token) = authed(config)?;
    let decks = api.list_decks(&token).await?;

    if decks.is_empty() {
        println!("No decks yet. Create one with `flashify decks create <name>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for deck in &decks {
        table.add_row(vec![deck.id.as_str(), deck.name.as_str()]);
    }
    println!("{table}");
    Ok(())
}

pub async fn create(config: &Config, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Deck name is required");
    }

    let (api, token) = authed(config)?;
    api.create_deck(&token, name).await?;
    println!("Created deck \"{name}\".");
    Ok(())
}

pub async fn delete(config: &Config, id: &str) -> Result<()> {
    let (api, token) = authed(config)?;
    api.delete_deck(&token, id).await?;
    println!("Deck deleted.");
    Ok(())
}
