pub mod geo;
pub mod place;
