use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use skycast_core::{
    Controller, ForecastClient, ForecastDay, GeocodeClient, LocationStore, Place, ViewState,
};

use crate::format;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Daily forecast lookup by place name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a place once and print its forecast.
    Show {
        /// Place name, e.g. "Berlin".
        place: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Show { place }) => show_once(&place).await,
            None => interactive().await,
        }
    }
}

/// One-shot lookup. Unlike the interactive loop, errors are reported to the
/// caller instead of being swallowed.
async fn show_once(query: &str) -> anyhow::Result<()> {
    let geocoder = GeocodeClient::new();
    let forecaster = ForecastClient::new();

    let place = geocoder
        .resolve(query)
        .await
        .with_context(|| format!("Failed to resolve location {query:?}"))?;

    let days = forecaster
        .daily(&place)
        .await
        .with_context(|| format!("Failed to fetch forecast for {}", place.name))?;

    print_forecast(&place, &days);
    Ok(())
}

/// Prompt loop: seed the first lookup from the persisted store, then run
/// one resolution sequence per entered query. Esc or Ctrl-C exits.
async fn interactive() -> anyhow::Result<()> {
    let store = LocationStore::open()?;
    let seed = store.load();
    let controller = Controller::new(GeocodeClient::new(), ForecastClient::new(), store);

    if !seed.is_empty() {
        controller.submit(&seed).await;
        render(&controller.snapshot());
    }

    loop {
        let last_query = controller.snapshot().query;
        let query = Text::new("Search for location:")
            .with_initial_value(&last_query)
            .prompt();

        match query {
            Ok(query) => {
                controller.submit(&query).await;
                render(&controller.snapshot());
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Prompt failed"),
        }
    }

    Ok(())
}

fn render(state: &ViewState) {
    match &state.place {
        Some(place) => print_forecast(place, &state.days),
        None => println!("(nothing to show)"),
    }
}

fn print_forecast(place: &Place, days: &[ForecastDay]) {
    println!();
    println!("Weather {} {}", place.name, place.country_flag);

    for (i, day) in days.iter().enumerate() {
        println!(
            "  {}  {:<5}  {}",
            format::weather_icon(day.weather_code),
            format::day_label(day.date, i == 0),
            format::temp_range(day.temp_min, day.temp_max),
        );
    }

    println!();
}
