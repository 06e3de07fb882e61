use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use crate::errors::SearchError;
use crate::models::geo::LatLng;
use crate::models::place::{PlaceDetails, PlaceResult, SearchRequest};
use crate::providers::places_provider::{NearbySearchPage, PlacesProvider, SearchStatus};

pub fn park(id: &str) -> PlaceResult {
    PlaceResult::new(id, format!("Park {}", id), LatLng::new(38.9, -77.0))
}

pub fn ok_page(ids: &[&str], next_page_token: Option<&str>) -> NearbySearchPage {
    NearbySearchPage {
        status: SearchStatus::Ok,
        results: ids.iter().map(|id| park(id)).collect(),
        next_page_token: next_page_token.map(str::to_string),
        error_message: None,
    }
}

pub fn zero_results_page() -> NearbySearchPage {
    NearbySearchPage {
        status: SearchStatus::ZeroResults,
        results: Vec::new(),
        next_page_token: None,
        error_message: None,
    }
}

pub fn ids(results: &[PlaceResult]) -> Vec<String> {
    results.iter().map(|place| place.place_id.clone()).collect()
}

pub enum Scripted {
    Page(NearbySearchPage),
    Fail(SearchError),
}

/// In-memory provider replaying scripted pages in order.
#[derive(Default)]
pub struct ScriptedProvider {
    pages: Mutex<VecDeque<Scripted>>,
    /// Extra latency keyed by the request center latitude, in milliseconds.
    latency_by_lat: Mutex<HashMap<i64, u64>>,
    failing_details: Mutex<HashSet<String>>,
    details: Mutex<HashMap<String, PlaceDetails>>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub requests: Mutex<Vec<(SearchRequest, Option<String>)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: NearbySearchPage) -> &Self {
        self.pages.lock().unwrap().push_back(Scripted::Page(page));
        self
    }

    pub fn push_failure(&self, error: SearchError) -> &Self {
        self.pages.lock().unwrap().push_back(Scripted::Fail(error));
        self
    }

    pub fn delay_for_lat(&self, lat: f64, delay: Duration) -> &Self {
        self.latency_by_lat
            .lock()
            .unwrap()
            .insert(lat.round() as i64, delay.as_millis() as u64);
        self
    }

    pub fn fail_details_for(&self, place_id: &str) -> &Self {
        self.failing_details.lock().unwrap().insert(place_id.to_string());
        self
    }

    pub fn details_for(&self, place_id: &str, details: PlaceDetails) -> &Self {
        self.details.lock().unwrap().insert(place_id.to_string(), details);
        self
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesProvider for ScriptedProvider {
    async fn nearby_search(
        &self,
        request: &SearchRequest,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, SearchError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), page_token.map(str::to_string)));
        let next = self.pages.lock().unwrap().pop_front();

        let latency = self
            .latency_by_lat
            .lock()
            .unwrap()
            .get(&(request.center.lat.round() as i64))
            .copied();
        if let Some(millis) = latency {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        match next {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Fail(error)) => Err(error),
            None => Ok(zero_results_page()),
        }
    }

    async fn get_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetails, SearchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_details.lock().unwrap().contains(place_id) {
            return Err(SearchError::NetworkFailure("connection reset".to_string()));
        }
        if let Some(details) = self.details.lock().unwrap().get(place_id) {
            return Ok(details.clone());
        }
        Ok(PlaceDetails {
            opening_hours: None,
            photos: vec![format!("https://photos.test/{}.jpg", place_id)],
            reviews: Vec::new(),
        })
    }
}
