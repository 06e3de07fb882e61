use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::{OffsetDateTime, Weekday};
use time::macros::format_description;
use crate::models::geo::LatLng;

pub const UNNAMED_LOCATION: &str = "Unnamed Location";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchRequest {
    pub center: LatLng,
    pub radius_meters: f64,
    pub keyword: String,
    /// Provider place type restriction, e.g. `park`
    #[serde(default)]
    pub place_type: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub position: LatLng,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub vicinity: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    /// Monday first, e.g. `"Monday: 6:00 AM – 10:00 PM"`
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Review {
    pub author: String,
    pub rating: f64,
    pub text: String,
    pub timestamp_sec: i64,
    pub profile_photo_url: Option<String>,
}

/// Secondary lookup payload merged into a [`PlaceResult`].
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct PlaceDetails {
    pub opening_hours: Option<OpeningHours>,
    pub photos: Vec<String>,
    pub reviews: Vec<Review>,
}

impl PlaceResult {
    pub fn new(place_id: impl Into<String>, name: impl Into<String>, position: LatLng) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            position,
            rating: None,
            rating_count: None,
            vicinity: None,
            opening_hours: None,
            photos: Vec::new(),
            reviews: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: PlaceDetails) -> Self {
        self.opening_hours = details.opening_hours;
        self.photos = details.photos;
        self.reviews = details.reviews;
        self
    }

    pub fn opening_hours_summary(&self, today: Weekday) -> String {
        let hours = match &self.opening_hours {
            Some(hours) => hours,
            None => return "Hours not available".to_string(),
        };

        if hours.open_now != Some(true) {
            return "Closed Now".to_string();
        }

        let todays_hours = hours
            .weekday_text
            .get(today.number_days_from_monday() as usize)
            .and_then(|line| line.split_once(": "))
            .map(|(_, hours)| hours)
            .unwrap_or("");

        format!("Open Now • {}", todays_hours)
    }

    pub fn share_url(&self) -> String {
        format!("https://www.google.com/maps/place/?q=place_id:{}", self.place_id)
    }

    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            self.position.lat,
            self.position.lng
        )
    }
}

impl Review {
    pub fn posted_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.timestamp_sec).ok()
    }

    pub fn posted_on(&self) -> String {
        let format = format_description!("[month]/[day]/[year]");
        self.posted_at()
            .and_then(|posted_at| posted_at.format(format).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park() -> PlaceResult {
        PlaceResult::new("abc123", "Shaw Dog Park", LatLng::new(38.9126, -77.0219))
    }

    #[test]
    fn summary_without_hours() {
        assert_eq!(park().opening_hours_summary(Weekday::Monday), "Hours not available");
    }

    #[test]
    fn summary_when_closed() {
        let mut park = park();
        park.opening_hours = Some(OpeningHours { open_now: Some(false), weekday_text: vec![] });
        assert_eq!(park.opening_hours_summary(Weekday::Monday), "Closed Now");
    }

    #[test]
    fn summary_when_open_picks_todays_line() {
        let mut park = park();
        park.opening_hours = Some(OpeningHours {
            open_now: Some(true),
            weekday_text: vec![
                "Monday: 6:00 AM – 9:00 PM".to_string(),
                "Tuesday: 7:00 AM – 8:00 PM".to_string(),
            ],
        });
        assert_eq!(park.opening_hours_summary(Weekday::Tuesday), "Open Now • 7:00 AM – 8:00 PM");
        assert_eq!(park.opening_hours_summary(Weekday::Sunday), "Open Now • ");
    }

    #[test]
    fn links_point_at_google_maps() {
        let park = park();
        assert_eq!(park.share_url(), "https://www.google.com/maps/place/?q=place_id:abc123");
        assert_eq!(
            park.directions_url(),
            "https://www.google.com/maps/dir/?api=1&destination=38.9126,-77.0219"
        );
    }

    #[test]
    fn details_replace_enrichment_fields_only() {
        let mut base = park();
        base.rating = Some(4.5);
        let enriched = base.clone().with_details(PlaceDetails {
            opening_hours: None,
            photos: vec!["https://example.test/photo.jpg".to_string()],
            reviews: vec![],
        });
        assert_eq!(enriched.rating, Some(4.5));
        assert_eq!(enriched.photos.len(), 1);
        assert_eq!(enriched.place_id, base.place_id);
    }

    #[test]
    fn review_date_is_formatted_from_unix_seconds() {
        let review = Review {
            author: "Sam".to_string(),
            rating: 5.0,
            text: "Great fenced area".to_string(),
            timestamp_sec: 1_700_000_000,
            profile_photo_url: None,
        };
        assert_eq!(review.posted_on(), "11/14/2023");
    }
}
