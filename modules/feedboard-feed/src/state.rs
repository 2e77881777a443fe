//! Dashboard state managed by the reducer.
//!
//! `FeedState` holds the canonical items, the criteria that shape them, the
//! materialized view, and the session's preferences. Fields are public for
//! reading; every mutation goes through [`FeedReducer`](crate::FeedReducer)
//! so the view never drifts from the criteria.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use feedboard_common::config::DEFAULT_CATEGORIES;
use feedboard_common::{BasicFilters, ContentItem, FeedSource, SearchMode, SortKey};

use crate::pipeline::derive_view;

/// Entries kept in the search history, newest first.
pub const SEARCH_HISTORY_LIMIT: usize = 10;

/// Items kept in the trending snapshot.
pub const TRENDING_LIMIT: usize = 10;

pub const TRENDING_SEARCHES: [&str; 5] = [
    "technology trends",
    "sports news",
    "finance updates",
    "health tips",
    "entertainment buzz",
];

#[derive(Debug, Clone)]
pub struct FeedState {
    /// Canonical collection, in arrival order.
    pub items: Vec<ContentItem>,

    /// Materialized view. Derived from `items` except right after a reorder.
    pub view: Vec<ContentItem>,

    pub filters: BasicFilters,
    pub sort_by: SortKey,
    pub search: SearchMode,

    /// First items of the latest social page 1. Not touched by later merges.
    pub trending_items: Vec<ContentItem>,

    /// Next page `next_page_requested` will fetch, starting at 1.
    pub current_page: u32,

    /// Last `has_more` each source reported since the last clear.
    pub sources_has_more: BTreeMap<FeedSource, bool>,

    /// Fetches requested but not yet answered.
    pub in_flight: usize,

    /// Message of the most recent failed fetch, cleared on the next request.
    pub error: Option<String>,

    /// Preference categories; also the social hashtags.
    pub categories: Vec<String>,

    /// Favorited ids in the order they were added.
    pub favorites: Vec<String>,

    /// Recent searches, newest first.
    pub search_history: Vec<String>,
}

impl FeedState {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            items: Vec::new(),
            view: Vec::new(),
            filters: BasicFilters::default(),
            sort_by: SortKey::default(),
            search: SearchMode::default(),
            trending_items: Vec::new(),
            current_page: 1,
            sources_has_more: BTreeMap::new(),
            in_flight: 0,
            error: None,
            categories,
            favorites: Vec::new(),
            search_history: Vec::new(),
        }
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// True until every source that has answered reports no further pages.
    pub fn has_more(&self) -> bool {
        self.sources_has_more.is_empty() || self.sources_has_more.values().any(|more| *more)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Canonical items whose id is favorited, in canonical order.
    pub fn favorite_items(&self) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| self.is_favorite(&item.id))
            .collect()
    }

    pub fn trending_searches(&self) -> &'static [&'static str] {
        &TRENDING_SEARCHES
    }

    /// Rebuild the view from the canonical items and current criteria.
    pub(crate) fn recompute(&mut self, now: DateTime<Utc>) {
        self.view = derive_view(
            &self.items,
            &self.filters,
            &self.sort_by,
            &self.search,
            now,
        );
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}
