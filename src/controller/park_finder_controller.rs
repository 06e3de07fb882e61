use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};
use crate::controller::AppState;
use crate::models::geo::Viewport;
use crate::models::place::PlaceResult;
use crate::park_finder::finder::{ListingFilter, ParkFinder};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(list_parks))
        .route("/viewport", post(settle_viewport))
        .route("/selected", get(retrieve_selected_park))
        .route("/select", post(select_park).delete(clear_selected_park))
        .route("/selected/reviews", post(open_selected_reviews))
        .route_layer(Extension(app_state.finder))
}

pub async fn settle_viewport(
    Extension(finder): Extension<Arc<ParkFinder>>,
    Json(viewport): Json<Viewport>,
) -> impl IntoResponse {
    info!("Viewport settled at {}", viewport.center);
    finder.on_viewport_settle(viewport);
    (StatusCode::ACCEPTED, "Viewport received")
}

pub async fn list_parks(
    Extension(finder): Extension<Arc<ParkFinder>>,
    Query(filter): Query<ListingFilter>,
) -> impl IntoResponse {
    let listing = finder.listing(&filter);
    (StatusCode::OK, Json(listing))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SelectParkBody {
    pub place_id: String,
}

pub async fn select_park(
    Extension(finder): Extension<Arc<ParkFinder>>,
    Json(body): Json<SelectParkBody>,
) -> impl IntoResponse {
    return match finder.select_result(&body.place_id) {
        Some(park) => {
            (StatusCode::OK, Json(park_card(&park, false))).into_response()
        }
        None => {
            warn!("Attempted to select unknown park: {}", body.place_id);
            (StatusCode::NOT_FOUND, "Park not found in current results").into_response()
        }
    };
}

pub async fn clear_selected_park(
    Extension(finder): Extension<Arc<ParkFinder>>,
) -> impl IntoResponse {
    finder.clear_selection();
    (StatusCode::OK, "Selection cleared")
}

pub async fn retrieve_selected_park(
    Extension(finder): Extension<Arc<ParkFinder>>,
) -> impl IntoResponse {
    return match finder.selected() {
        Some(selected) => {
            (
                StatusCode::OK,
                Json(park_card(&selected.park, selected.reviews_open))
            ).into_response()
        }
        None => (StatusCode::OK, Json(json!({}))).into_response(),
    };
}

pub async fn open_selected_reviews(
    Extension(finder): Extension<Arc<ParkFinder>>,
) -> impl IntoResponse {
    if finder.open_reviews() {
        (StatusCode::OK, "Reviews opened")
    } else {
        (StatusCode::BAD_REQUEST, "Selected park has no reviews to show")
    }
}

/// Detail popover payload for one park.
fn park_card(
    park: &PlaceResult,
    reviews_open: bool,
) -> serde_json::Value {
    let today = OffsetDateTime::now_utc().weekday();
    let reviews: Vec<serde_json::Value> = park
        .reviews
        .iter()
        .map(|review| json!({
            "author": review.author,
            "rating": review.rating,
            "text": review.text,
            "posted_on": review.posted_on(),
            "profile_photo_url": review.profile_photo_url,
        }))
        .collect();

    json!({
        "park": park,
        "opening_hours_summary": park.opening_hours_summary(today),
        "share_url": park.share_url(),
        "directions_url": park.directions_url(),
        "reviews": reviews,
        "reviews_open": reviews_open,
    })
}
