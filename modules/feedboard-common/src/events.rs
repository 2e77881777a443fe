//! Dashboard events: every state transition the feed can undergo.
//!
//! User intent (search, filter, sort, reorder, favorites) and fetch
//! outcomes share one enum so a single reducer owns all mutation.
//! Events serialize to `serde_json::Value` for the event journal.

use feedboard_engine::EventLike;
use serde::{Deserialize, Serialize};

use crate::types::{
    AdvancedSearchCriteria, ContentItem, FeedSource, FilterChange, SortKey, TypeFilter,
};

/// Something the user asked for, or something a source answered.
///
/// The `type` tag doubles as the journal's event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    // -----------------------------------------------------------------------
    // Criteria
    // -----------------------------------------------------------------------
    SearchQuerySet {
        query: String,
    },

    AdvancedSearchSet {
        criteria: AdvancedSearchCriteria,
    },

    FilterChanged {
        change: FilterChange,
    },

    SortChanged {
        sort_by: SortKey,
    },

    FiltersCleared,

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------
    ContentReordered {
        old_index: usize,
        new_index: usize,
    },

    // -----------------------------------------------------------------------
    // Item store and fetching
    // -----------------------------------------------------------------------
    ContentCleared,

    NextPageRequested,

    FeedRequested {
        page: u32,
    },

    SearchRequested {
        query: String,
        content_type: TypeFilter,
        page: u32,
    },

    PageLoaded {
        source: FeedSource,
        page: u32,
        items: Vec<ContentItem>,
        has_more: bool,
        total: u64,
    },

    SearchResultsLoaded {
        query: String,
        page: u32,
        items: Vec<ContentItem>,
        has_more: bool,
    },

    PageLoadFailed {
        source: FeedSource,
        page: u32,
        message: String,
    },

    // -----------------------------------------------------------------------
    // Preferences and history
    // -----------------------------------------------------------------------
    CategoriesUpdated {
        categories: Vec<String>,
    },

    FavoriteToggled {
        id: String,
    },

    SearchHistoryAdded {
        query: String,
    },

    SearchHistoryCleared,
}

impl FeedEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            FeedEvent::SearchQuerySet { .. } => "search_query_set",
            FeedEvent::AdvancedSearchSet { .. } => "advanced_search_set",
            FeedEvent::FilterChanged { .. } => "filter_changed",
            FeedEvent::SortChanged { .. } => "sort_changed",
            FeedEvent::FiltersCleared => "filters_cleared",
            FeedEvent::ContentReordered { .. } => "content_reordered",
            FeedEvent::ContentCleared => "content_cleared",
            FeedEvent::NextPageRequested => "next_page_requested",
            FeedEvent::FeedRequested { .. } => "feed_requested",
            FeedEvent::SearchRequested { .. } => "search_requested",
            FeedEvent::PageLoaded { .. } => "page_loaded",
            FeedEvent::SearchResultsLoaded { .. } => "search_results_loaded",
            FeedEvent::PageLoadFailed { .. } => "page_load_failed",
            FeedEvent::CategoriesUpdated { .. } => "categories_updated",
            FeedEvent::FavoriteToggled { .. } => "favorite_toggled",
            FeedEvent::SearchHistoryAdded { .. } => "search_history_added",
            FeedEvent::SearchHistoryCleared => "search_history_cleared",
        }
    }

    /// Whether this event changes the search/filter/sort criteria.
    pub fn is_criteria_change(&self) -> bool {
        matches!(
            self,
            FeedEvent::SearchQuerySet { .. }
                | FeedEvent::AdvancedSearchSet { .. }
                | FeedEvent::FilterChanged { .. }
                | FeedEvent::SortChanged { .. }
                | FeedEvent::FiltersCleared
        )
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("FeedEvent serialization should never fail")
    }

    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(payload.clone())
    }
}

impl EventLike for FeedEvent {
    fn event_type_str(&self) -> String {
        self.event_type().to_string()
    }

    fn to_persist_payload(&self) -> serde_json::Value {
        self.to_payload()
    }
}
