use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::config::Config;
use crate::models::geo::{LatLng, Viewport};
use crate::models::place::{PlaceResult, SearchRequest};
use crate::park_finder::debounce::Debouncer;
use crate::park_finder::filters::{apply_filters, paginate, Page, DEFAULT_PAGE_SIZE};
use crate::park_finder::search::search;
use crate::providers::places_provider::PlacesProvider;

pub const DEFAULT_KEYWORD: &str = "dog park";

#[derive(Clone, Debug)]
pub struct FinderSettings {
    pub keyword: String,
    pub debounce: Duration,
    pub page_delay: Duration,
    pub page_size: usize,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            debounce: Duration::from_millis(500),
            page_delay: Duration::from_secs(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<&Config> for FinderSettings {
    fn from(config: &Config) -> Self {
        Self {
            keyword: config.search_keyword.clone(),
            debounce: config.debounce(),
            page_delay: config.page_delay(),
            page_size: config.page_size,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct ListingFilter {
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default)]
    pub search_term: String,
    pub page: Option<usize>,
}

#[derive(Clone, Serialize, Debug)]
pub struct ParkListing {
    pub parks: Page<PlaceResult>,
    pub total_found: usize,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Serialize, Debug)]
pub struct SelectedPark {
    pub park: PlaceResult,
    pub reviews_open: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
    /// Center moved less than the refetch threshold on both axes.
    Skipped,
    Published { count: usize },
    Failed { message: String },
    /// A newer fetch started while this one was in flight.
    Stale,
}

#[derive(Default)]
struct FinderState {
    results: Vec<PlaceResult>,
    last_fetched_center: Option<LatLng>,
    generation: u64,
    is_loading: bool,
    error: Option<String>,
    current_page: usize,
    selected: Option<String>,
    reviews_open: bool,
}

/// Live view of dog parks around the settled map viewport.
pub struct ParkFinder {
    provider: Arc<dyn PlacesProvider>,
    settings: FinderSettings,
    state: Mutex<FinderState>,
    debouncer: Debouncer,
}

impl ParkFinder {
    pub fn new(
        provider: Arc<dyn PlacesProvider>,
        settings: FinderSettings,
    ) -> Self {
        let debouncer = Debouncer::new(settings.debounce);
        Self {
            provider,
            settings,
            state: Mutex::new(FinderState {
                current_page: 1,
                ..Default::default()
            }),
            debouncer,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FinderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Schedules a refresh once the viewport has been still for the debounce window.
    pub fn on_viewport_settle(self: &Arc<Self>, viewport: Viewport) {
        let finder = Arc::clone(self);
        self.debouncer.call(async move {
            finder.refresh(viewport).await;
        });
    }

    pub async fn refresh(&self, viewport: Viewport) -> RefreshOutcome {
        let request = SearchRequest {
            center: viewport.center,
            radius_meters: viewport.visible_radius(),
            keyword: self.settings.keyword.clone(),
            place_type: None,
        };

        let generation = {
            let mut state = self.lock_state();
            if let Some(last) = state.last_fetched_center {
                if last.is_near(&viewport.center) {
                    debug!("Viewport center {} too close to last fetch at {}, skipping", viewport.center, last);
                    return RefreshOutcome::Skipped;
                }
            }
            state.last_fetched_center = Some(viewport.center);
            state.generation += 1;
            state.is_loading = true;
            state.generation
        };

        info!(
            "Searching for '{}' within {:.0}m of {} (fetch #{})",
            request.keyword,
            request.radius_meters,
            request.center,
            generation
        );
        let outcome = search(self.provider.as_ref(), &request, self.settings.page_delay).await;

        let mut state = self.lock_state();
        if state.generation != generation {
            info!("Discarding stale results of fetch #{}, latest is #{}", generation, state.generation);
            return RefreshOutcome::Stale;
        }
        state.is_loading = false;

        match outcome {
            Ok(results) => {
                let count = results.len();
                let selection_survives = state
                    .selected
                    .as_ref()
                    .map_or(false, |id| results.iter().any(|place| &place.place_id == id));
                if !selection_survives {
                    state.selected = None;
                    state.reviews_open = false;
                }
                state.results = results;
                state.error = None;
                state.current_page = 1;
                info!("Published {} dog parks for fetch #{}", count, generation);
                RefreshOutcome::Published { count }
            }
            Err(e) => {
                warn!("Something went wrong fetching dog parks due to: {}", e);
                let message = e.user_message().to_string();
                state.error = Some(message.clone());
                RefreshOutcome::Failed { message }
            }
        }
    }

    /// Filtered, paginated view of the current result set. Passing a page
    /// moves the current page; otherwise the current page is reused.
    pub fn listing(&self, filter: &ListingFilter) -> ParkListing {
        let mut state = self.lock_state();
        let filtered = apply_filters(&state.results, filter.min_rating, &filter.search_term);
        let page = filter.page.unwrap_or(state.current_page);
        let parks = paginate(&filtered, page, self.settings.page_size);
        state.current_page = parks.page;

        ParkListing {
            parks,
            total_found: state.results.len(),
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    /// Focuses one park, closing any open reviews overlay. Unknown ids leave
    /// the current selection untouched.
    pub fn select_result(&self, place_id: &str) -> Option<PlaceResult> {
        let mut state = self.lock_state();
        let park = state
            .results
            .iter()
            .find(|place| place.place_id == place_id)
            .cloned()?;
        state.selected = Some(park.place_id.clone());
        state.reviews_open = false;
        Some(park)
    }

    pub fn clear_selection(&self) {
        let mut state = self.lock_state();
        state.selected = None;
        state.reviews_open = false;
    }

    pub fn selected(&self) -> Option<SelectedPark> {
        let state = self.lock_state();
        let selected = state.selected.as_ref()?;
        state
            .results
            .iter()
            .find(|place| &place.place_id == selected)
            .map(|park| SelectedPark {
                park: park.clone(),
                reviews_open: state.reviews_open,
            })
    }

    /// Opens the reviews overlay for the focused park if it has any reviews.
    pub fn open_reviews(&self) -> bool {
        let mut state = self.lock_state();
        let has_reviews = match state.selected.as_ref() {
            Some(selected) => state
                .results
                .iter()
                .any(|place| &place.place_id == selected && !place.reviews.is_empty()),
            None => false,
        };
        state.reviews_open = has_reviews;
        has_reviews
    }
}

#[cfg(test)]
impl ParkFinder {
    pub fn results(&self) -> Vec<PlaceResult> {
        self.lock_state().results.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock_state().error.clone()
    }
}
