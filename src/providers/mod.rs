pub mod google_places;
pub mod places_provider;
