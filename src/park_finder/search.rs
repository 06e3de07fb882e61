use std::collections::HashSet;
use std::time::Duration;
use futures::future::join_all;
use tracing::{debug, warn};
use crate::errors::SearchError;
use crate::models::place::{PlaceResult, SearchRequest};
use crate::providers::places_provider::{PlacesProvider, SearchStatus};

/// Hard cap on results accumulated across continuation pages.
pub const MAX_ACCUMULATED_RESULTS: usize = 60;

/// Runs a nearby search, following continuation tokens sequentially until
/// [`MAX_ACCUMULATED_RESULTS`] places have been received, then enriches every
/// place with its details. A failed detail lookup leaves that place without
/// details instead of failing the search.
pub async fn search(
    provider: &dyn PlacesProvider,
    request: &SearchRequest,
    page_delay: Duration,
) -> Result<Vec<PlaceResult>, SearchError> {
    let places = collect_pages(provider, request, page_delay).await?;
    Ok(attach_details(provider, places).await)
}

async fn collect_pages(
    provider: &dyn PlacesProvider,
    request: &SearchRequest,
    page_delay: Duration,
) -> Result<Vec<PlaceResult>, SearchError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut accumulated: Vec<PlaceResult> = Vec::new();
    let mut page_token: Option<String> = None;
    let mut received: usize = 0;

    loop {
        let page = provider
            .nearby_search(request, page_token.as_deref())
            .await?;

        match page.status {
            SearchStatus::Ok => {}
            SearchStatus::ZeroResults => break,
            SearchStatus::Other(status) => {
                return Err(SearchError::ProviderError {
                    status,
                    message: page.error_message,
                });
            }
        }

        // Duplicates still count toward the cap, so paging always ends
        let received_on_page = page.results.len();
        received += received_on_page;
        for place in page.results {
            if accumulated.len() >= MAX_ACCUMULATED_RESULTS {
                break;
            }
            if seen.insert(place.place_id.clone()) {
                accumulated.push(place);
            }
        }
        debug!(
            "Nearby search page returned {} places, {} received, {} unique",
            received_on_page,
            received,
            accumulated.len()
        );

        match page.next_page_token {
            Some(token) if received < MAX_ACCUMULATED_RESULTS && received_on_page > 0 => {
                tokio::time::sleep(page_delay).await;
                page_token = Some(token);
            }
            _ => break,
        }
    }

    Ok(accumulated)
}

async fn attach_details(
    provider: &dyn PlacesProvider,
    places: Vec<PlaceResult>,
) -> Vec<PlaceResult> {
    let lookups = places
        .iter()
        .map(|place| provider.get_details(&place.place_id));
    let details = join_all(lookups).await;

    places
        .into_iter()
        .zip(details)
        .map(|(place, details)| match details {
            Ok(details) => place.with_details(details),
            Err(e) => {
                warn!("Failed to retrieve details for place: {}, due to: {}", place.place_id, e);
                place.with_details(Default::default())
            }
        })
        .collect()
}
