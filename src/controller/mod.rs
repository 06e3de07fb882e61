use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::park_finder::finder::ParkFinder;
use crate::providers::places_provider::PlacesProvider;

pub mod dog_parks_api;
pub mod health_check;
pub mod park_finder_controller;

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<ParkFinder>,
    pub provider: Arc<dyn PlacesProvider>,
    pub search_keyword: String,
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    let app = application(app_state, origins);

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Dog park API listening on: {}", address);
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn application(
    app_state: AppState,
    origins: Vec<HeaderValue>,
) -> Router {
    router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::DELETE,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
        )
        .fallback(page_not_found_handler)
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(health_check::router())
        .nest("/parks", park_finder_controller::router(app_state.clone()))
        .nest("/places", dog_parks_api::router(app_state))
}
