use thiserror::Error;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch dog parks. Please try again.";

/// Failures that abort a nearby search. `ZERO_RESULTS` is not one of them.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Network failure talking to places provider: {0}")]
    NetworkFailure(String),

    #[error("Places provider returned status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ProviderError {
        status: String,
        message: Option<String>,
    },
}

impl SearchError {
    pub fn user_message(&self) -> &'static str {
        SEARCH_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::NetworkFailure(e.to_string())
    }
}
