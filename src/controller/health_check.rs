use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tracing::debug;

pub fn router() -> Router {
    Router::new().route("/health", get(get_health_check))
}

/// Liveness check, does not touch the places provider
async fn get_health_check() -> Result<StatusCode, StatusCode>
{
    debug!("Health check requested");
    Ok(StatusCode::OK)
}
