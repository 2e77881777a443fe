//! The Filter/Sort Engine: pure derivations from the canonical items and
//! the current criteria to the materialized view.
//!
//! Two mutually exclusive paths:
//! - basic: inline operators, basic filters, free text, sort key
//! - advanced: the advanced-search criteria set with its own sort key
//!
//! Neither path can fail. Inputs are borrowed; the view is a fresh `Vec`.

pub mod advanced;
pub mod basic;
pub mod dates;
pub mod operators;
mod sort;

use chrono::{DateTime, Utc};
use feedboard_common::{BasicFilters, ContentItem, SearchMode, SortKey};

pub use advanced::apply_advanced_search;
pub use basic::apply_filters_and_sort;
pub use operators::SearchOperators;

/// Run whichever path `search` selects.
///
/// Basic filters and `sort_by` only feed the basic path; advanced search
/// carries its own filters and sort key.
pub fn derive_view(
    items: &[ContentItem],
    filters: &BasicFilters,
    sort_by: &SortKey,
    search: &SearchMode,
    now: DateTime<Utc>,
) -> Vec<ContentItem> {
    match search {
        SearchMode::Basic(text) => apply_filters_and_sort(items, filters, sort_by, text, now),
        SearchMode::Advanced(criteria) => apply_advanced_search(items, criteria, now),
    }
}

/// Case-insensitive substring test against an already-lowercased needle.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
