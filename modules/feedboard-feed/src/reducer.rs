//! Pure state updates for the dashboard.
//!
//! Every [`FeedEvent`] lands here exactly once. Criteria changes and store
//! merges end in a full recompute of the view; a reorder permutes the view
//! and nothing else. No I/O.

use feedboard_common::{FeedEvent, FeedSource, SearchMode};
use feedboard_engine::Reducer;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::reorder::reorder;
use crate::state::{FeedState, SEARCH_HISTORY_LIMIT, TRENDING_LIMIT};
use crate::store::{merge_page, trending_snapshot};

pub struct FeedReducer<C: Clock = SystemClock> {
    clock: C,
}

impl FeedReducer<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for FeedReducer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FeedReducer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> Reducer<FeedEvent, FeedState> for FeedReducer<C> {
    fn reduce(&self, state: &mut FeedState, event: &FeedEvent) {
        if event.is_criteria_change() {
            debug!(event = event.event_type(), "Criteria changed");
        }

        match event {
            // Criteria
            FeedEvent::SearchQuerySet { query } => {
                state.search = SearchMode::Basic(query.clone());
                self.recompute(state);
            }
            FeedEvent::AdvancedSearchSet { criteria } => {
                state.search = SearchMode::Advanced(criteria.clone());
                self.recompute(state);
            }
            FeedEvent::FilterChanged { change } => {
                state.filters.apply(change.clone());
                self.recompute(state);
            }
            FeedEvent::SortChanged { sort_by } => {
                state.sort_by = sort_by.clone();
                if let SearchMode::Advanced(criteria) = &mut state.search {
                    criteria.sort_by = sort_by.clone();
                }
                self.recompute(state);
            }
            FeedEvent::FiltersCleared => {
                state.filters = Default::default();
                if state.search.is_advanced() {
                    state.search = SearchMode::default();
                }
                self.recompute(state);
            }

            // View
            FeedEvent::ContentReordered {
                old_index,
                new_index,
            } => {
                if !reorder(&mut state.view, *old_index, *new_index) {
                    warn!(
                        old_index,
                        new_index,
                        len = state.view.len(),
                        "Ignoring out-of-range reorder"
                    );
                }
            }

            // Store and fetching
            FeedEvent::ContentCleared => clear_content(state),
            FeedEvent::NextPageRequested => {
                state.current_page = state.current_page.saturating_add(1);
            }
            FeedEvent::FeedRequested { .. } => {
                state.in_flight += FeedSource::FEEDS.len();
                state.error = None;
            }
            FeedEvent::SearchRequested { .. } => {
                state.in_flight += 1;
                state.error = None;
            }
            FeedEvent::PageLoaded {
                source,
                page,
                items,
                has_more,
                ..
            } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.sources_has_more.insert(*source, *has_more);
                if let Some(trending) = trending_snapshot(*source, *page, items, TRENDING_LIMIT) {
                    state.trending_items = trending;
                }
                merge_page(&mut state.items, *source, *page, items.clone());
                self.recompute(state);
                info!(
                    source = %source,
                    page,
                    count = items.len(),
                    total_items = state.items.len(),
                    "Page merged"
                );
            }
            FeedEvent::SearchResultsLoaded {
                query,
                page,
                items,
                has_more,
            } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.sources_has_more.insert(FeedSource::Search, *has_more);
                merge_page(&mut state.items, FeedSource::Search, *page, items.clone());
                self.recompute(state);
                info!(query = %query, page, count = items.len(), "Search results merged");
            }
            FeedEvent::PageLoadFailed {
                source,
                page,
                message,
            } => {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.error = Some(message.clone());
                warn!(source = %source, page, error = %message, "Page load failed");
            }

            // Preferences and history
            FeedEvent::CategoriesUpdated { categories } => {
                state.categories = categories.clone();
                clear_content(state);
            }
            FeedEvent::FavoriteToggled { id } => {
                let existing = state.favorites.iter().position(|f| f == id);
                match existing {
                    Some(idx) => {
                        state.favorites.remove(idx);
                    }
                    None => state.favorites.push(id.clone()),
                }
            }
            FeedEvent::SearchHistoryAdded { query } => {
                let query = query.trim();
                if !query.is_empty() && !state.search_history.iter().any(|q| q == query) {
                    state.search_history.insert(0, query.to_string());
                    state.search_history.truncate(SEARCH_HISTORY_LIMIT);
                }
            }
            FeedEvent::SearchHistoryCleared => state.search_history.clear(),
        }
    }
}

impl<C: Clock> FeedReducer<C> {
    fn recompute(&self, state: &mut FeedState) {
        state.recompute(self.clock.now());
    }
}

fn clear_content(state: &mut FeedState) {
    state.items.clear();
    state.view.clear();
    state.current_page = 1;
    state.sources_has_more.clear();
}
