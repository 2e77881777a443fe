//! Behavioural contract of the feed reducer.
//!
//! Drives `FeedReducer` with events only and checks the view after each
//! step, the way the dispatch engine would.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use feedboard_common::{
    AdvancedSearchCriteria, ContentItem, ContentType, DateRange, FeedEvent, FeedSource,
    FilterChange, SearchMode, SortKey, TypeFilter,
};
use feedboard_engine::Reducer;
use feedboard_feed::{FeedReducer, FeedState, FixedClock};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn item(id: &str, ct: ContentType, title: &str, category: &str, hours_ago: i64) -> ContentItem {
    ContentItem {
        id: id.into(),
        content_type: ct,
        title: title.into(),
        description: format!("Coverage of {category}"),
        image_url: None,
        url: None,
        category: category.into(),
        published_at: now() - Duration::hours(hours_ago),
        source: "NewsAPI".into(),
        is_favorite: None,
    }
}

fn ids(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

struct Harness {
    reducer: FeedReducer<FixedClock>,
    state: FeedState,
}

impl Harness {
    fn new() -> Self {
        Self {
            reducer: FeedReducer::with_clock(FixedClock(now())),
            state: FeedState::default(),
        }
    }

    fn seeded() -> Self {
        let mut h = Self::new();
        h.send(FeedEvent::PageLoaded {
            source: FeedSource::News,
            page: 1,
            items: vec![
                item("n1", ContentType::News, "City budget vote", "finance", 5),
                item("n2", ContentType::News, "Cup final", "sports", 3),
                item("n3", ContentType::News, "Chip fab opens", "technology", 8),
            ],
            has_more: true,
            total: 3,
        });
        let post = item("s1", ContentType::Social, "Budget fun", "technology", 1);
        h.send(FeedEvent::PageLoaded {
            source: FeedSource::Social,
            page: 1,
            items: vec![post],
            has_more: true,
            total: 1,
        });
        h
    }

    fn send(&mut self, event: FeedEvent) {
        self.reducer.reduce(&mut self.state, &event);
    }

    fn view(&self) -> Vec<&str> {
        ids(&self.state.view)
    }
}

#[test]
fn store_merge_recomputes_view() {
    let h = Harness::seeded();
    assert_eq!(h.view(), vec!["s1", "n2", "n1", "n3"]);
}

#[test]
fn criteria_changes_recompute_from_canonical_items() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::ContentType(TypeFilter::Social),
    });
    assert_eq!(h.view(), vec!["s1"]);

    // A narrower view must not shrink what the next change can see.
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::ContentType(TypeFilter::All),
    });
    assert_eq!(h.view(), vec!["s1", "n2", "n1", "n3"]);
}

#[test]
fn search_modes_are_mutually_exclusive() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::SearchQuerySet {
        query: "budget".into(),
    });
    assert_eq!(h.state.search, SearchMode::Basic("budget".into()));

    h.send(FeedEvent::AdvancedSearchSet {
        criteria: AdvancedSearchCriteria {
            query: "cup".into(),
            ..Default::default()
        },
    });
    assert!(h.state.search.is_advanced());
    assert_eq!(h.state.search.search_query(), "");
    assert_eq!(h.view(), vec!["n2"]);

    h.send(FeedEvent::SearchQuerySet {
        query: "chip".into(),
    });
    assert!(h.state.search.advanced().is_none());
    assert_eq!(h.view(), vec!["n3"]);
}

#[test]
fn reorder_swaps_two_and_is_self_inverse() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::SearchQuerySet {
        query: "budget".into(),
    });
    assert_eq!(h.view(), vec!["s1", "n1"]);

    let swap = FeedEvent::ContentReordered {
        old_index: 0,
        new_index: 1,
    };
    h.send(swap.clone());
    assert_eq!(h.view(), vec!["n1", "s1"]);
    h.send(swap);
    assert_eq!(h.view(), vec!["s1", "n1"]);
}

#[test]
fn reorder_is_discarded_by_next_recompute() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::ContentReordered {
        old_index: 3,
        new_index: 0,
    });
    assert_eq!(h.view(), vec!["n3", "s1", "n2", "n1"]);
    assert_eq!(ids(&h.state.items), vec!["n1", "n2", "n3", "s1"]);

    h.send(FeedEvent::SortChanged {
        sort_by: SortKey::Newest,
    });
    assert_eq!(h.view(), vec!["s1", "n2", "n1", "n3"]);
}

#[test]
fn category_filter_keeps_relative_order() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::SortChanged {
        sort_by: SortKey::from("unsorted"),
    });
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::Categories(BTreeSet::from(["technology".to_string()])),
    });
    assert_eq!(h.view(), vec!["n3", "s1"]);
}

#[test]
fn inline_type_operator_with_text() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::SearchQuerySet {
        query: "type:news BUDGET".into(),
    });
    assert_eq!(h.view(), vec!["n1"]);
}

#[test]
fn oldest_reverses_newest() {
    let mut h = Harness::seeded();
    let newest: Vec<String> = h.view().into_iter().map(String::from).collect();
    h.send(FeedEvent::SortChanged {
        sort_by: SortKey::Oldest,
    });
    let mut oldest: Vec<String> = h.view().into_iter().map(String::from).collect();
    oldest.reverse();
    assert_eq!(newest, oldest);
}

#[test]
fn clear_filters_resets_basic_and_drops_advanced() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::ContentType(TypeFilter::News),
    });
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::Categories(BTreeSet::from(["sports".to_string()])),
    });
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::DateRange(DateRange::Today),
    });
    h.send(FeedEvent::AdvancedSearchSet {
        criteria: AdvancedSearchCriteria {
            query: "cup".into(),
            ..Default::default()
        },
    });

    h.send(FeedEvent::FiltersCleared);
    assert_eq!(h.state.filters.content_type, TypeFilter::All);
    assert!(h.state.filters.categories.is_empty());
    assert_eq!(h.state.filters.date_range, DateRange::All);
    assert!(!h.state.search.is_advanced());
    assert_eq!(h.view().len(), 4);
}

#[test]
fn criteria_events_are_idempotent() {
    let mut h = Harness::seeded();
    let event = FeedEvent::FilterChanged {
        change: FilterChange::ContentType(TypeFilter::News),
    };
    h.send(event.clone());
    let once = h.state.view.clone();
    h.send(event);
    assert_eq!(h.state.view, once);
}

#[test]
fn filter_change_under_advanced_search_uses_advanced_path() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::AdvancedSearchSet {
        criteria: AdvancedSearchCriteria {
            query: "budget".into(),
            ..Default::default()
        },
    });
    h.send(FeedEvent::FilterChanged {
        change: FilterChange::ContentType(TypeFilter::News),
    });
    assert_eq!(h.state.filters.content_type, TypeFilter::News);
    assert_eq!(h.view(), vec!["s1", "n1"]);
}

#[test]
fn news_first_page_replaces_prior_news() {
    let mut h = Harness::seeded();
    let fresh: Vec<ContentItem> = (0..10)
        .map(|i| {
            item(
                &format!("news-technology-1-{i}"),
                ContentType::News,
                &format!("Breaking: technology news update {}", i + 11),
                "technology",
                i,
            )
        })
        .collect();
    h.send(FeedEvent::PageLoaded {
        source: FeedSource::News,
        page: 1,
        items: fresh,
        has_more: true,
        total: 50,
    });

    let news: Vec<&str> = h
        .state
        .items
        .iter()
        .filter(|i| i.content_type == ContentType::News)
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(news.len(), 10);
    for (i, id) in news.iter().enumerate() {
        assert_eq!(*id, format!("news-technology-1-{i}"));
    }
    assert!(h.state.items.iter().any(|i| i.id == "s1"));
}

#[test]
fn search_results_replace_everything_on_first_page() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::SearchRequested {
        query: "cats".into(),
        content_type: TypeFilter::All,
        page: 1,
    });
    let hit = item("search-cats-1-0", ContentType::Social, "Cat", "pet", 0);
    h.send(FeedEvent::SearchResultsLoaded {
        query: "cats".into(),
        page: 1,
        items: vec![hit],
        has_more: true,
    });
    assert_eq!(ids(&h.state.items), vec!["search-cats-1-0"]);
    assert_eq!(h.view(), vec!["search-cats-1-0"]);
    assert!(!h.state.loading());
}

#[test]
fn failed_page_leaves_items_unchanged() {
    let mut h = Harness::seeded();
    let before = h.state.items.clone();
    h.send(FeedEvent::FeedRequested { page: 2 });
    h.send(FeedEvent::PageLoadFailed {
        source: FeedSource::News,
        page: 2,
        message: "Request failed after 3 attempts".into(),
    });
    assert_eq!(h.state.items, before);
    assert_eq!(
        h.state.error.as_deref(),
        Some("Request failed after 3 attempts")
    );
}

#[test]
fn categories_update_clears_content() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::NextPageRequested);
    h.send(FeedEvent::CategoriesUpdated {
        categories: vec!["health".into()],
    });
    assert_eq!(h.state.categories, vec!["health"]);
    assert!(h.state.items.is_empty());
    assert!(h.state.view.is_empty());
    assert_eq!(h.state.current_page, 1);
}

#[test]
fn favorites_toggle_in_insertion_order() {
    let mut h = Harness::seeded();
    for id in ["n3", "n1", "n3", "s1"] {
        h.send(FeedEvent::FavoriteToggled { id: id.into() });
    }
    assert_eq!(h.state.favorites, vec!["n1", "s1"]);
    assert!(h.state.is_favorite("s1"));
    assert!(!h.state.is_favorite("n3"));
    let favs = h.state.favorite_items();
    assert_eq!(favs.len(), 2);
    assert_eq!(favs[0].id, "n1");
    assert_eq!(favs[1].id, "s1");
}

#[test]
fn search_history_is_trimmed_deduped_and_capped() {
    let mut h = Harness::new();
    h.send(FeedEvent::SearchHistoryAdded { query: " ".into() });
    assert!(h.state.search_history.is_empty());

    for i in 0..12 {
        h.send(FeedEvent::SearchHistoryAdded {
            query: format!(" q{i} "),
        });
    }
    h.send(FeedEvent::SearchHistoryAdded {
        query: "q11".into(),
    });
    assert_eq!(h.state.search_history.len(), 10);
    assert_eq!(h.state.search_history[0], "q11");
    assert_eq!(h.state.search_history[9], "q2");

    h.send(FeedEvent::SearchHistoryCleared);
    assert!(h.state.search_history.is_empty());
}

#[test]
fn empty_view_is_not_an_error() {
    let mut h = Harness::seeded();
    h.send(FeedEvent::SearchQuerySet {
        query: "nothing matches this".into(),
    });
    assert!(h.state.view.is_empty());
    assert!(h.state.error.is_none());
}
