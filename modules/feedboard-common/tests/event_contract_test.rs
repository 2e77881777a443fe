//! Event contract tests.
//!
//! These pin down the shape of the journal payloads:
//! - Every event has a deterministic event_type string
//! - The event_type tag matches the serde tag exactly
//! - Payloads round-trip through JSON
//! - Criteria events are classified separately from fetch/store events

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use feedboard_common::events::FeedEvent;
use feedboard_common::types::*;

fn sample_item() -> ContentItem {
    ContentItem {
        id: "news-technology-1-0".into(),
        content_type: ContentType::News,
        title: "Breaking: technology news update 11".into(),
        description: "Latest developments in technology.".into(),
        image_url: None,
        url: Some("https://example.com/news/technology/10".into()),
        category: "technology".into(),
        published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        source: "NewsAPI".into(),
        is_favorite: Some(false),
    }
}

fn build_all_events() -> Vec<FeedEvent> {
    vec![
        FeedEvent::SearchQuerySet {
            query: "type:news budget".into(),
        },
        FeedEvent::AdvancedSearchSet {
            criteria: AdvancedSearchCriteria {
                query: "budget".into(),
                exclude_words: vec!["rumor".into()],
                content_types: BTreeSet::from([ContentType::News]),
                date_from: Some("2024-01-01".into()),
                sort_by: SortKey::Relevance,
                ..Default::default()
            },
        },
        FeedEvent::FilterChanged {
            change: FilterChange::Categories(BTreeSet::from(["technology".to_string()])),
        },
        FeedEvent::SortChanged {
            sort_by: SortKey::Oldest,
        },
        FeedEvent::FiltersCleared,
        FeedEvent::ContentReordered {
            old_index: 0,
            new_index: 1,
        },
        FeedEvent::ContentCleared,
        FeedEvent::NextPageRequested,
        FeedEvent::FeedRequested { page: 1 },
        FeedEvent::SearchRequested {
            query: "climate".into(),
            content_type: TypeFilter::All,
            page: 1,
        },
        FeedEvent::PageLoaded {
            source: FeedSource::News,
            page: 1,
            items: vec![sample_item()],
            has_more: true,
            total: 50,
        },
        FeedEvent::SearchResultsLoaded {
            query: "climate".into(),
            page: 1,
            items: vec![sample_item()],
            has_more: true,
        },
        FeedEvent::PageLoadFailed {
            source: FeedSource::Social,
            page: 2,
            message: "API error (status 500): Failed to fetch social posts".into(),
        },
        FeedEvent::CategoriesUpdated {
            categories: vec!["health".into()],
        },
        FeedEvent::FavoriteToggled {
            id: "news-technology-1-0".into(),
        },
        FeedEvent::SearchHistoryAdded {
            query: "budget".into(),
        },
        FeedEvent::SearchHistoryCleared,
    ]
}

#[test]
fn event_type_method_matches_serde_tag_for_all_variants() {
    for event in build_all_events() {
        let payload = event.to_payload();
        let serde_type = payload["type"].as_str().unwrap_or("<missing>");
        assert_eq!(event.event_type(), serde_type);
    }
}

#[test]
fn no_duplicate_event_types() {
    let mut seen = std::collections::HashSet::new();
    for event in build_all_events() {
        let et = event.event_type();
        assert!(seen.insert(et), "Duplicate event_type: {et}");
    }
}

#[test]
fn payloads_round_trip() {
    for event in build_all_events() {
        let payload = event.to_payload();
        let back = FeedEvent::from_payload(&payload)
            .unwrap_or_else(|e| panic!("{} failed to deserialize: {e}", event.event_type()));
        assert_eq!(back, event);
    }
}

#[test]
fn criteria_events_are_exactly_the_five_criteria_mutations() {
    let criteria: Vec<&str> = build_all_events()
        .iter()
        .filter(|e| e.is_criteria_change())
        .map(|e| e.event_type())
        .collect();
    assert_eq!(
        criteria,
        vec![
            "search_query_set",
            "advanced_search_set",
            "filter_changed",
            "sort_changed",
            "filters_cleared",
        ]
    );
}

#[test]
fn advanced_criteria_accepts_partial_payloads() {
    let payload = serde_json::json!({
        "type": "advanced_search_set",
        "criteria": { "query": "rates", "sortBy": "popular" }
    });
    let event = FeedEvent::from_payload(&payload).unwrap();
    match event {
        FeedEvent::AdvancedSearchSet { criteria } => {
            assert_eq!(criteria.query, "rates");
            assert_eq!(criteria.sort_by, SortKey::Popular);
            assert!(criteria.exclude_words.is_empty());
            assert!(criteria.date_to.is_none());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
