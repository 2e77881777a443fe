//! Basic path: operators, basic filters, free text, then sort.

use chrono::{DateTime, Utc};
use feedboard_common::{BasicFilters, ContentItem, SortKey};

use super::contains_ci;
use super::dates::cutoff;
use super::operators::SearchOperators;
use super::sort::sort_items;

/// Derive the view for basic (free-text) search.
///
/// Filters run in a fixed order: `type:` operators, `source:` operators
/// (substring, case-insensitive), content type, categories, date range,
/// then the operator-free query against title, description and category.
/// Relevance with an empty query sorts newest first.
pub fn apply_filters_and_sort(
    items: &[ContentItem],
    filters: &BasicFilters,
    sort_by: &SortKey,
    search_text: &str,
    now: DateTime<Utc>,
) -> Vec<ContentItem> {
    let ops = SearchOperators::parse(search_text);
    let mut filtered: Vec<ContentItem> = items.to_vec();

    if ops.has_type() {
        filtered.retain(|item| ops.types.iter().any(|t| t == item.content_type.as_str()));
    }

    if ops.has_source() {
        let wanted: Vec<String> = ops.sources.iter().map(|s| s.to_lowercase()).collect();
        filtered.retain(|item| {
            let source = item.source.to_lowercase();
            wanted.iter().any(|w| source.contains(w.as_str()))
        });
    }

    if let Some(ct) = filters.content_type.content_type() {
        filtered.retain(|item| item.content_type == ct);
    }

    if !filters.categories.is_empty() {
        filtered.retain(|item| filters.categories.contains(&item.category));
    }

    if let Some(since) = cutoff(filters.date_range, now) {
        filtered.retain(|item| item.published_at >= since);
    }

    // The trimmed query gates the filter; the untrimmed one is matched.
    let has_query = !ops.clean_query.trim().is_empty();
    let query = ops.clean_query.to_lowercase();
    if has_query {
        filtered.retain(|item| {
            contains_ci(&item.title, &query)
                || contains_ci(&item.description, &query)
                || contains_ci(&item.category, &query)
        });
    }

    let newest = SortKey::Newest;
    let key = if *sort_by == SortKey::Relevance && !has_query {
        &newest
    } else {
        sort_by
    };
    sort_items(&mut filtered, key, |item| {
        if contains_ci(&item.title, &query) {
            2
        } else {
            1
        }
    });

    filtered
}
