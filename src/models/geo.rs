use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
pub const MAX_SEARCH_RADIUS_METERS: f64 = 50_000.0;
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 5_000.0;

/// Per axis threshold, in degrees, under which a recentred map does not refetch.
pub const REFETCH_THRESHOLD_DEGREES: f64 = 0.01;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in meters using the haversine formula.
    pub fn haversine_distance(&self, other: &LatLng) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let delta_phi = (other.lat - self.lat).to_radians();
        let delta_lambda = (other.lng - self.lng).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }

    /// True when both axes moved by less than [`REFETCH_THRESHOLD_DEGREES`].
    ///
    /// This is deliberately not a distance check: each axis is compared on its own.
    pub fn is_near(&self, other: &LatLng) -> bool {
        (self.lat - other.lat).abs() < REFETCH_THRESHOLD_DEGREES
            && (self.lng - other.lng).abs() < REFETCH_THRESHOLD_DEGREES
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Visible map region as reported by the front-end once panning settles.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    #[serde(default)]
    pub bounds_north_east: Option<LatLng>,
}

impl Viewport {
    pub fn new(center: LatLng, bounds_north_east: Option<LatLng>) -> Self {
        Self { center, bounds_north_east }
    }

    /// Radius covering the visible area, measured from the center to the
    /// north-east corner and capped at [`MAX_SEARCH_RADIUS_METERS`].
    pub fn visible_radius(&self) -> f64 {
        match self.bounds_north_east {
            Some(north_east) => self
                .center
                .haversine_distance(&north_east)
                .min(MAX_SEARCH_RADIUS_METERS),
            None => DEFAULT_SEARCH_RADIUS_METERS,
        }
    }
}
