//! Advanced path: a chain of independent criteria, then sort.

use chrono::{DateTime, Utc};
use feedboard_common::{AdvancedSearchCriteria, ContentItem};

use super::contains_ci;
use super::dates::parse_bound;
use super::sort::sort_items;

/// Derive the view for an advanced search.
///
/// Each criterion applies only when set, in this order: query (title,
/// description, category), exact phrase (title, description; plain
/// substring), excluded words, content types, categories, sources (exact),
/// date bounds (inclusive; a missing `from` is the epoch, a missing `to` is
/// `now`). Basic filters play no part here.
pub fn apply_advanced_search(
    items: &[ContentItem],
    criteria: &AdvancedSearchCriteria,
    now: DateTime<Utc>,
) -> Vec<ContentItem> {
    let mut filtered: Vec<ContentItem> = items.to_vec();

    let has_query = !criteria.query.trim().is_empty();
    let query = criteria.query.to_lowercase();
    if has_query {
        filtered.retain(|item| {
            contains_ci(&item.title, &query)
                || contains_ci(&item.description, &query)
                || contains_ci(&item.category, &query)
        });
    }

    if !criteria.exact_phrase.trim().is_empty() {
        let phrase = criteria.exact_phrase.to_lowercase();
        filtered.retain(|item| {
            contains_ci(&item.title, &phrase) || contains_ci(&item.description, &phrase)
        });
    }

    // A blank word would match every item; skip those.
    let excluded: Vec<String> = criteria
        .exclude_words
        .iter()
        .filter(|w| !w.trim().is_empty())
        .map(|w| w.to_lowercase())
        .collect();
    if !excluded.is_empty() {
        filtered.retain(|item| {
            let text = format!("{} {}", item.title, item.description).to_lowercase();
            !excluded.iter().any(|w| text.contains(w.as_str()))
        });
    }

    if !criteria.content_types.is_empty() {
        filtered.retain(|item| criteria.content_types.contains(&item.content_type));
    }

    if !criteria.categories.is_empty() {
        filtered.retain(|item| criteria.categories.contains(&item.category));
    }

    if !criteria.sources.is_empty() {
        filtered.retain(|item| criteria.sources.contains(&item.source));
    }

    let from = parse_bound(criteria.date_from.as_deref());
    let to = parse_bound(criteria.date_to.as_deref());
    if from.is_some() || to.is_some() {
        let from = from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let to = to.unwrap_or(now);
        filtered.retain(|item| item.published_at >= from && item.published_at <= to);
    }

    sort_items(&mut filtered, &criteria.sort_by, |item| {
        if !has_query {
            return 0;
        }
        let mut score = 0;
        if contains_ci(&item.title, &query) {
            score += 3;
        }
        if contains_ci(&item.description, &query) {
            score += 1;
        }
        score
    });

    filtered
}
