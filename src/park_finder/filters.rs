use serde::{Deserialize, Serialize};
use crate::models::place::PlaceResult;

pub const DEFAULT_PAGE_SIZE: usize = 30;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Keeps parks rated at least `min_rating` whose name or vicinity contains
/// `search_term`, ignoring case. A zero rating or empty term disables that check.
pub fn apply_filters(
    results: &[PlaceResult],
    min_rating: f64,
    search_term: &str,
) -> Vec<PlaceResult> {
    let needle = search_term.to_lowercase();

    results
        .iter()
        .filter(|place| min_rating <= 0.0 || place.rating.unwrap_or(0.0) >= min_rating)
        .filter(|place| {
            needle.is_empty()
                || place.name.to_lowercase().contains(&needle)
                || place
                    .vicinity
                    .as_ref()
                    .map_or(false, |vicinity| vicinity.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    ((count + page_size - 1) / page_size).max(1)
}

/// 1-indexed slice, out of range pages are clamped to the nearest valid page.
pub fn paginate<T: Clone>(
    filtered: &[T],
    page: usize,
    page_size: usize,
) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(filtered.len(), page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(filtered.len());
    let items = filtered.get(start..end).map(|s| s.to_vec()).unwrap_or_default();

    Page {
        items,
        page,
        total_pages,
        total_items: filtered.len(),
    }
}
