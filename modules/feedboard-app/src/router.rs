//! FeedRouter: turns fetch requests into fetches.
//!
//! Every completion comes back as its own child event, so the reducer
//! merges each source's page in a separate transition.

use anyhow::Result;
use async_trait::async_trait;
use feedboard_client::SourceClient;
use feedboard_common::{ContentPage, FeedEvent, FeedSource};
use feedboard_engine::{Router, StoredEvent};
use feedboard_feed::FeedState;
use tracing::info;

pub struct FeedRouter;

#[async_trait]
impl Router<FeedEvent, FeedState, SourceClient> for FeedRouter {
    async fn route(
        &self,
        event: &FeedEvent,
        stored: &StoredEvent,
        state: &FeedState,
        client: &SourceClient,
    ) -> Result<Vec<FeedEvent>> {
        match event {
            FeedEvent::FeedRequested { page } => {
                let page = *page;
                let topics = &state.categories;
                info!(seq = stored.seq, page, categories = ?topics, "Fetching feeds");

                let (news, recommendations, social) = futures::join!(
                    client.fetch_news(topics, page),
                    client.fetch_recommendations(topics, page),
                    client.fetch_social(topics, page),
                );

                Ok(vec![
                    completion(FeedSource::News, page, news),
                    completion(FeedSource::Recommendations, page, recommendations),
                    completion(FeedSource::Social, page, social),
                ])
            }

            FeedEvent::SearchRequested {
                query,
                content_type,
                page,
            } => {
                info!(seq = stored.seq, query = %query, page, "Searching");
                let event = match client.search(query, *content_type, *page).await {
                    Ok(results) => FeedEvent::SearchResultsLoaded {
                        query: results.query,
                        page: results.page,
                        items: results.items,
                        has_more: results.has_more,
                    },
                    Err(e) => FeedEvent::PageLoadFailed {
                        source: FeedSource::Search,
                        page: *page,
                        message: e.to_string(),
                    },
                };
                Ok(vec![event])
            }

            // The reducer has already advanced the page.
            FeedEvent::NextPageRequested => Ok(vec![FeedEvent::FeedRequested {
                page: state.current_page,
            }]),

            FeedEvent::CategoriesUpdated { .. } => Ok(vec![FeedEvent::FeedRequested { page: 1 }]),

            _ => Ok(vec![]),
        }
    }
}

fn completion(
    source: FeedSource,
    page: u32,
    result: feedboard_client::Result<ContentPage>,
) -> FeedEvent {
    match result {
        Ok(loaded) => FeedEvent::PageLoaded {
            source,
            page: loaded.page,
            items: loaded.items,
            has_more: loaded.has_more,
            total: loaded.total,
        },
        Err(e) => FeedEvent::PageLoadFailed {
            source,
            page,
            message: e.to_string(),
        },
    }
}
