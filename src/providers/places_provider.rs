use async_trait::async_trait;
use crate::errors::SearchError;
use crate::models::place::{PlaceDetails, PlaceResult, SearchRequest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Ok,
    ZeroResults,
    Other(String),
}

impl SearchStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => SearchStatus::Ok,
            "ZERO_RESULTS" => SearchStatus::ZeroResults,
            other => SearchStatus::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NearbySearchPage {
    pub status: SearchStatus,
    pub results: Vec<PlaceResult>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// Injected seam over the hosted places service.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Fetch one page of nearby results. A `page_token` continues a previous search.
    async fn nearby_search(
        &self,
        request: &SearchRequest,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, SearchError>;

    async fn get_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetails, SearchError>;
}
