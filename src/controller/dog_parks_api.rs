use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use crate::controller::AppState;
use crate::models::geo::{LatLng, DEFAULT_SEARCH_RADIUS_METERS};
use crate::models::place::SearchRequest;
use crate::providers::places_provider::{PlacesProvider, SearchStatus};

const DEFAULT_PLACE_TYPE: &str = "park";

/// Keyword forwarded by the proxy, shared with the finder configuration.
#[derive(Clone)]
pub struct ProxyKeyword(String);

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/nearby", get(proxy_nearby_dog_parks))
        .route_layer(Extension(app_state.provider))
        .route_layer(Extension(ProxyKeyword(app_state.search_keyword)))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NearbyParams {
    lat: Option<f64>,
    lng: Option<f64>,
    /// Place type restriction, `park` unless given. An empty value disables it.
    r#type: Option<String>,
}

/// Single page nearby search at a fixed radius, for clients without a map viewport.
pub async fn proxy_nearby_dog_parks(
    Extension(provider): Extension<Arc<dyn PlacesProvider>>,
    Extension(ProxyKeyword(keyword)): Extension<ProxyKeyword>,
    Query(params): Query<NearbyParams>,
) -> impl IntoResponse {
    let (lat, lng) = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing required parameters" }))
            ).into_response();
        }
    };

    let request = SearchRequest {
        center: LatLng::new(lat, lng),
        radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
        keyword,
        place_type: match params.r#type {
            Some(place_type) if place_type.is_empty() => None,
            Some(place_type) => Some(place_type),
            None => Some(DEFAULT_PLACE_TYPE.to_string()),
        },
    };

    return match provider.nearby_search(&request, None).await {
        Ok(page) => match page.status {
            SearchStatus::Ok | SearchStatus::ZeroResults => {
                (
                    StatusCode::OK,
                    Json(json!({
                        "results": page.results,
                        "next_page_token": page.next_page_token,
                    }))
                ).into_response()
            }
            SearchStatus::Other(status) => {
                warn!("Places provider rejected nearby search with status: {}", status);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to fetch dog parks" }))
                ).into_response()
            }
        },
        Err(e) => {
            warn!("Something went wrong fetching dog parks due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch dog parks" }))
            ).into_response()
        }
    };
}
