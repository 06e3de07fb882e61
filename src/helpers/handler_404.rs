use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use tracing::debug;

pub async fn page_not_found_handler(uri: Uri) -> impl IntoResponse {
    debug!("No route for {}", uri);
    (StatusCode::IM_A_TEAPOT, "Oops looks like you wandered off the dog park trail, teapot")
}
