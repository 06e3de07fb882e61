use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, warn};
use crate::errors::SearchError;
use crate::models::geo::LatLng;
use crate::models::place::{OpeningHours, PlaceDetails, PlaceResult, Review, SearchRequest, UNNAMED_LOCATION};
use crate::providers::places_provider::{NearbySearchPage, PlacesProvider, SearchStatus};

const DETAIL_FIELDS: &str = "opening_hours,photos,reviews";
const PHOTO_MAX_WIDTH: u32 = 400;

pub struct GooglePlacesClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug)]
struct NearbySearchParams<'a> {
    location: Option<String>,
    radius: Option<String>,
    keyword: Option<&'a str>,
    r#type: Option<&'a str>,
    pagetoken: Option<&'a str>,
    key: &'a str,
}

#[derive(Clone, Serialize, Debug)]
struct DetailsParams<'a> {
    place_id: &'a str,
    fields: &'a str,
    key: &'a str,
}

#[derive(Deserialize, Debug)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawPlace {
    place_id: Option<String>,
    name: Option<String>,
    geometry: Option<RawGeometry>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    vicinity: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct RawGeometry {
    location: LatLng,
}

#[derive(Deserialize, Debug)]
struct DetailsResponse {
    status: String,
    result: Option<RawDetails>,
    error_message: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct RawDetails {
    opening_hours: Option<RawOpeningHours>,
    #[serde(default)]
    photos: Vec<RawPhoto>,
    #[serde(default)]
    reviews: Vec<RawReview>,
}

#[derive(Deserialize, Debug)]
struct RawOpeningHours {
    open_now: Option<bool>,
    #[serde(default)]
    weekday_text: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct RawPhoto {
    photo_reference: String,
}

// Every field is optional so one incomplete review cannot sink the whole payload
#[derive(Deserialize, Debug)]
struct RawReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    time: i64,
    profile_photo_url: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Direct photo link. The link carries the server's API key and is handed to
    /// clients as is, so the key should be restricted by HTTP referrer.
    fn photo_url(&self, photo_reference: &str) -> Option<String> {
        let mut url = match Url::parse(&format!("{}/photo", self.base_url)) {
            Ok(url) => url,
            Err(e) => {
                warn!("Failed to build photo url from base {}: {}", self.base_url, e);
                return None;
            }
        };
        url.query_pairs_mut()
            .append_pair("maxwidth", &PHOTO_MAX_WIDTH.to_string())
            .append_pair("photo_reference", photo_reference)
            .append_pair("key", &self.api_key);
        Some(url.to_string())
    }

    fn into_search_page(&self, response: NearbySearchResponse) -> NearbySearchPage {
        let results = response
            .results
            .into_iter()
            .filter_map(parse_raw_place)
            .collect();

        NearbySearchPage {
            status: SearchStatus::parse(&response.status),
            results,
            next_page_token: response.next_page_token.filter(|token| !token.is_empty()),
            error_message: response.error_message,
        }
    }

    fn into_details(&self, raw: RawDetails) -> PlaceDetails {
        PlaceDetails {
            opening_hours: raw.opening_hours.map(|hours| OpeningHours {
                open_now: hours.open_now,
                weekday_text: hours.weekday_text,
            }),
            photos: raw
                .photos
                .iter()
                .filter_map(|photo| self.photo_url(&photo.photo_reference))
                .collect(),
            reviews: raw
                .reviews
                .into_iter()
                .map(|review| Review {
                    author: review.author_name,
                    rating: review.rating,
                    text: review.text,
                    timestamp_sec: review.time,
                    profile_photo_url: review.profile_photo_url,
                })
                .collect(),
        }
    }
}

fn parse_raw_place(raw: RawPlace) -> Option<PlaceResult> {
    let (place_id, geometry) = match (raw.place_id, raw.geometry) {
        (Some(place_id), Some(geometry)) => (place_id, geometry),
        (place_id, _) => {
            warn!("Dropping place result without id or location: {:?}", place_id);
            return None;
        }
    };

    let mut place = PlaceResult::new(
        place_id,
        raw.name.unwrap_or_else(|| UNNAMED_LOCATION.to_string()),
        geometry.location,
    );
    place.rating = raw.rating;
    place.rating_count = raw.user_ratings_total;
    place.vicinity = raw.vicinity;
    place.types = raw.types;
    Some(place)
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby_search(
        &self,
        request: &SearchRequest,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, SearchError> {
        // Continuation requests must carry only the token and the key
        let params = match page_token {
            Some(token) => NearbySearchParams {
                location: None,
                radius: None,
                keyword: None,
                r#type: None,
                pagetoken: Some(token),
                key: &self.api_key,
            },
            None => NearbySearchParams {
                location: Some(request.center.to_string()),
                radius: Some(format!("{:.0}", request.radius_meters)),
                keyword: Some(&request.keyword),
                r#type: request.place_type.as_deref(),
                pagetoken: None,
                key: &self.api_key,
            },
        };

        debug!(
            "Nearby search around {} radius {:.0}m, continuation: {}",
            request.center,
            request.radius_meters,
            page_token.is_some()
        );

        let response: NearbySearchResponse = self
            .http
            .get(format!("{}/nearbysearch/json", self.base_url))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(self.into_search_page(response))
    }

    async fn get_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetails, SearchError> {
        let params = DetailsParams {
            place_id,
            fields: DETAIL_FIELDS,
            key: &self.api_key,
        };

        let response: DetailsResponse = self
            .http
            .get(format!("{}/details/json", self.base_url))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match SearchStatus::parse(&response.status) {
            SearchStatus::Ok => Ok(self.into_details(response.result.unwrap_or_default())),
            _ => Err(SearchError::ProviderError {
                status: response.status,
                message: response.error_message,
            }),
        }
    }
}
