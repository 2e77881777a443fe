//! Item store: merges source pages into the canonical collection.

use feedboard_common::{ContentItem, FeedSource};

/// Fold one fetched page into `items`.
///
/// A feed source's first page drops every existing item of that source's
/// type before appending; search's first page drops everything. Later pages
/// append unconditionally, duplicate ids included.
pub fn merge_page(
    items: &mut Vec<ContentItem>,
    source: FeedSource,
    page: u32,
    batch: Vec<ContentItem>,
) {
    if page <= 1 {
        match source.content_type() {
            Some(ct) => items.retain(|item| item.content_type != ct),
            None => items.clear(),
        }
    }
    items.extend(batch);
}

/// The trending snapshot seeded by social page 1, if this page is one.
pub fn trending_snapshot(
    source: FeedSource,
    page: u32,
    batch: &[ContentItem],
    limit: usize,
) -> Option<Vec<ContentItem>> {
    if source != FeedSource::Social || page > 1 {
        return None;
    }
    Some(batch.iter().take(limit).cloned().collect())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use feedboard_common::ContentType::{self, News, Recommendation, Social};

    use super::*;

    fn item(id: &str, ct: ContentType) -> ContentItem {
        ContentItem {
            id: id.into(),
            content_type: ct,
            title: id.into(),
            description: String::new(),
            image_url: None,
            url: None,
            category: "technology".into(),
            published_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            source: "test".into(),
            is_favorite: None,
        }
    }

    fn ids(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn first_page_replaces_only_its_own_type() {
        let mut items = vec![item("n0", News), item("s1", Social), item("n00", News)];
        merge_page(&mut items, FeedSource::News, 1, vec![item("n-new", News)]);
        assert_eq!(ids(&items), vec!["s1", "n-new"]);
    }

    #[test]
    fn later_pages_append_without_dedup() {
        let mut items = vec![item("r1", Recommendation)];
        let page = vec![item("r1", Recommendation), item("r2", Recommendation)];
        merge_page(&mut items, FeedSource::Recommendations, 2, page);
        assert_eq!(ids(&items), vec!["r1", "r1", "r2"]);
    }

    #[test]
    fn search_first_page_replaces_everything() {
        let mut items = vec![item("n1", News), item("s1", Social)];
        merge_page(&mut items, FeedSource::Search, 1, vec![item("q1", Social)]);
        assert_eq!(ids(&items), vec!["q1"]);

        merge_page(&mut items, FeedSource::Search, 2, vec![item("q2", News)]);
        assert_eq!(ids(&items), vec!["q1", "q2"]);
    }

    #[test]
    fn trending_comes_from_social_first_page_only() {
        let batch: Vec<_> = (0..12).map(|i| item(&format!("s{i}"), Social)).collect();

        let snapshot = trending_snapshot(FeedSource::Social, 1, &batch, 10).unwrap();
        assert_eq!(snapshot.len(), 10);
        assert_eq!(snapshot[0].id, "s0");

        assert!(trending_snapshot(FeedSource::Social, 2, &batch, 10).is_none());
        assert!(trending_snapshot(FeedSource::News, 1, &batch, 10).is_none());
    }
}
