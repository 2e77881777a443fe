//! The dashboard: state plus the engine that mutates it.

use std::sync::Arc;

use anyhow::{Context, Result};
use feedboard_client::SourceClient;
use feedboard_common::{AdvancedSearchCriteria, FeedEvent, FilterChange, SortKey, TypeFilter};
use feedboard_engine::{Engine, MemoryEventSink};
use feedboard_feed::{suggestions, FeedReducer, FeedState};

use crate::router::FeedRouter;

type FeedEngine =
    Engine<FeedEvent, FeedState, SourceClient, FeedReducer, FeedRouter, Arc<MemoryEventSink>>;

/// One user's session: every action is an event dispatched through the
/// engine and recorded in the journal.
pub struct Dashboard {
    engine: FeedEngine,
    state: FeedState,
    client: SourceClient,
    journal: Arc<MemoryEventSink>,
    initial_categories: Vec<String>,
}

impl Dashboard {
    pub fn new(client: SourceClient, categories: Vec<String>) -> Self {
        let journal = Arc::new(MemoryEventSink::new());
        let session_id = uuid::Uuid::new_v4().to_string();
        Self {
            engine: Engine::new(FeedReducer::new(), FeedRouter, journal.clone(), session_id),
            state: FeedState::new(categories.clone()),
            client,
            journal,
            initial_categories: categories,
        }
    }

    /// Dispatch `event` and everything it causes. Returns how many events ran.
    pub async fn dispatch(&mut self, event: FeedEvent) -> Result<usize> {
        self.engine
            .dispatch(event, &mut self.state, &self.client)
            .await
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn journal(&self) -> &MemoryEventSink {
        &self.journal
    }

    pub fn session_id(&self) -> &str {
        self.engine.session_id()
    }

    pub fn client(&self) -> &SourceClient {
        &self.client
    }

    /// Rebuild the state by reducing the journal from a fresh session.
    /// Fetch completions are in the journal, so no request is repeated.
    pub fn rebuild_from_journal(&self) -> Result<FeedState> {
        let events = self
            .journal
            .events()
            .iter()
            .map(|stored| {
                FeedEvent::from_payload(&stored.payload)
                    .with_context(|| format!("Undecodable journal entry {}", stored.seq))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut state = FeedState::new(self.initial_categories.clone());
        self.engine.replay(&events, &mut state);
        Ok(state)
    }

    pub fn suggestions(&self, text: &str) -> Vec<String> {
        suggestions(&self.state.items, text)
    }

    // --- Fetching ---

    pub async fn load_feed(&mut self) -> Result<usize> {
        self.dispatch(FeedEvent::FeedRequested { page: 1 }).await
    }

    pub async fn load_more(&mut self) -> Result<usize> {
        self.dispatch(FeedEvent::NextPageRequested).await
    }

    pub async fn search(&mut self, query: &str, content_type: TypeFilter) -> Result<usize> {
        self.dispatch(FeedEvent::SearchRequested {
            query: query.to_string(),
            content_type,
            page: 1,
        })
        .await
    }

    pub async fn clear_content(&mut self) -> Result<usize> {
        self.dispatch(FeedEvent::ContentCleared).await
    }

    // --- Criteria ---

    pub async fn set_search_query(&mut self, query: &str) -> Result<usize> {
        self.dispatch(FeedEvent::SearchQuerySet {
            query: query.to_string(),
        })
        .await
    }

    pub async fn set_advanced_search(&mut self, criteria: AdvancedSearchCriteria) -> Result<usize> {
        self.dispatch(FeedEvent::AdvancedSearchSet { criteria })
            .await
    }

    pub async fn set_filter(&mut self, change: FilterChange) -> Result<usize> {
        self.dispatch(FeedEvent::FilterChanged { change }).await
    }

    pub async fn set_sort_by(&mut self, sort_by: SortKey) -> Result<usize> {
        self.dispatch(FeedEvent::SortChanged { sort_by }).await
    }

    pub async fn clear_filters(&mut self) -> Result<usize> {
        self.dispatch(FeedEvent::FiltersCleared).await
    }

    pub async fn reorder(&mut self, old_index: usize, new_index: usize) -> Result<usize> {
        self.dispatch(FeedEvent::ContentReordered {
            old_index,
            new_index,
        })
        .await
    }

    // --- Preferences and history ---

    pub async fn update_categories(&mut self, categories: Vec<String>) -> Result<usize> {
        self.dispatch(FeedEvent::CategoriesUpdated { categories })
            .await
    }

    pub async fn toggle_favorite(&mut self, id: &str) -> Result<usize> {
        self.dispatch(FeedEvent::FavoriteToggled { id: id.to_string() })
            .await
    }

    pub async fn add_search_history(&mut self, query: &str) -> Result<usize> {
        self.dispatch(FeedEvent::SearchHistoryAdded {
            query: query.to_string(),
        })
        .await
    }

    pub async fn clear_search_history(&mut self) -> Result<usize> {
        self.dispatch(FeedEvent::SearchHistoryCleared).await
    }
}
