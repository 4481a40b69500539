//! Destination paths for activity items

use crate::types::{ActivityItem, Category, Locale};

/// Locale-prefixed site path for an item.
///
/// Posts resolve by slug, life records by id. Posts without a slug and
/// unknown categories have no destination.
pub fn resolve_url(item: &ActivityItem, locale: Locale) -> Option<String> {
    match item.category {
        Category::Post => item
            .slug()
            .map(|slug| format!("/{}/blog/{}", locale.as_str(), slug)),
        Category::Life => Some(format!("/{}/life/{}", locale.as_str(), item.id)),
        Category::Unknown => None,
    }
}
