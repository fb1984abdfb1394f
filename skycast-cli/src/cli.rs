use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use skycast_core::{Config, Dashboard, HttpBackend, SearchQuery};

use crate::{app, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive dashboard (the default when no command is given).
    Dash,

    /// Fetch and print the weather for one query, then exit.
    Show {
        /// City name or coordinates, e.g. "Chennai" or "13.0827,80.2707".
        query: String,
    },

    /// Review and save the configuration.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dash) {
            Command::Dash => app::run().await,
            Command::Show { query } => show(&query).await,
            Command::Configure => configure(),
        }
    }
}

/// One-shot mode: classify the query, fetch both panels, print them once.
async fn show(input: &str) -> anyhow::Result<()> {
    let query = SearchQuery::parse(input)?;

    let config = Config::load()?;
    let backend = HttpBackend::from_config(&config).context("Failed to build backend client")?;
    let mut dash = Dashboard::new(Box::new(backend));

    dash.refresh(query).await;
    print!("{}", render::dashboard(&dash));

    if dash.current().error().is_some() || dash.forecast().error().is_some() {
        anyhow::bail!("weather fetch failed");
    }
    Ok(())
}

/// Prompt for each config field, prefilled with the current value.
fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let api_base_url = Text::new("Backend base URL:")
        .with_default(&current.api_base_url)
        .prompt()
        .context("Failed to read backend base URL")?;

    let geo_lookup_url = Text::new("Geolocation lookup URL:")
        .with_default(&current.geo_lookup_url)
        .prompt()
        .context("Failed to read geolocation lookup URL")?;

    let fallback_city = Text::new("Fallback city:")
        .with_default(&current.fallback_city)
        .prompt()
        .context("Failed to read fallback city")?;

    let config = Config {
        api_base_url,
        geo_lookup_url,
        fallback_city,
    };
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
