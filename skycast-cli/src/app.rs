//! Interactive dashboard loop.
//!
//! Renders the panels, then waits for one action at a time:
//! - Search for a city or a "lat,lon" pair
//! - Pick the forecast day shown in detail
//! - Quit

use anyhow::Context;
use inquire::validator::Validation;
use inquire::{Select, Text};
use skycast_core::{Config, Dashboard, HttpBackend, SearchQuery};
use tracing::debug;

use crate::render;

const ACTION_SEARCH: &str = "Search";
const ACTION_DAY: &str = "Choose forecast day";
const ACTION_QUIT: &str = "Quit";

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let backend = HttpBackend::from_config(&config).context("Failed to build backend client")?;
    let mut dash = Dashboard::new(Box::new(backend));

    println!("Locating you...");
    dash.bootstrap(&config.fallback_city).await;

    loop {
        dash.tick();
        print!("{}", render::dashboard(&dash));

        let action = Select::new("What next?", vec![ACTION_SEARCH, ACTION_DAY, ACTION_QUIT])
            .prompt();

        match action {
            Ok(ACTION_SEARCH) => search(&mut dash).await,
            Ok(ACTION_DAY) => choose_day(&mut dash),
            Ok(_) => break,
            // Esc or closed stdin ends the session.
            Err(err) => {
                debug!(%err, "prompt closed");
                break;
            }
        }
    }

    Ok(())
}

/// Prompt for a query. Invalid input is rejected inline with the guidance
/// message; an empty submission falls through and is ignored.
async fn search(dash: &mut Dashboard) {
    let input = Text::new("City or latitude,longitude:")
        .with_validator(|input: &str| {
            if input.trim().is_empty() || SearchQuery::parse(input).is_ok() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Enter a valid city or latitude,longitude".into()))
            }
        })
        .prompt();

    if let Ok(value) = input {
        if let Err(err) = dash.submit_search(&value).await {
            eprintln!("{err}");
        }
    }
}

/// Pick which forecast day the detail list shows.
fn choose_day(dash: &mut Dashboard) {
    let Some(groups) = dash.forecast().ready() else {
        println!("No forecast loaded yet.");
        return;
    };

    let labels: Vec<String> = groups.labels().map(str::to_string).collect();
    if labels.is_empty() {
        println!("No forecast days to choose from.");
        return;
    }

    if let Ok(label) = Select::new("Forecast day:", labels).prompt() {
        dash.select_day(&label);
    }
}
