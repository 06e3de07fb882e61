use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use crate::config::Config;
use crate::controller::AppState;
use crate::park_finder::finder::{FinderSettings, ParkFinder};
use crate::providers::google_places::GooglePlacesClient;
use crate::providers::places_provider::PlacesProvider;

pub mod config;
pub mod controller;
pub mod errors;
pub mod helpers;
pub mod models;
pub mod park_finder;
pub mod providers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!("Starting dog park finder in {} environment", config.environment);

    let provider: Arc<dyn PlacesProvider> = Arc::new(GooglePlacesClient::new(
        config.places_base_url.clone(),
        config.google_maps_api_key.clone(),
    ));
    let finder = Arc::new(ParkFinder::new(
        provider.clone(),
        FinderSettings::from(&config),
    ));

    let app_state = AppState {
        finder,
        provider,
        search_keyword: config.search_keyword.clone(),
    };

    controller::serve(app_state, &config)
        .await
        .context("Dog park API server exited")
}
