//! Search-box suggestions drawn from the loaded items.

use feedboard_common::ContentItem;

const TITLE_SUGGESTIONS: usize = 3;
const CATEGORY_SUGGESTIONS: usize = 3;
const MAX_SUGGESTIONS: usize = 5;

/// Up to three matching titles, then up to three matching categories,
/// de-duplicated in first-seen order and capped at five. Blank text
/// suggests nothing.
pub fn suggestions(items: &[ContentItem], text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = text.to_lowercase();

    let titles = items
        .iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .take(TITLE_SUGGESTIONS)
        .map(|item| item.title.clone());
    let categories = items
        .iter()
        .filter(|item| item.category.to_lowercase().contains(&needle))
        .take(CATEGORY_SUGGESTIONS)
        .map(|item| item.category.clone());

    let mut out: Vec<String> = Vec::new();
    for candidate in titles.chain(categories) {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out.truncate(MAX_SUGGESTIONS);
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use feedboard_common::ContentType;

    use super::*;

    fn item(title: &str, category: &str) -> ContentItem {
        ContentItem {
            id: title.into(),
            content_type: ContentType::News,
            title: title.into(),
            description: String::new(),
            image_url: None,
            url: None,
            category: category.into(),
            published_at: Utc::now(),
            source: "NewsAPI".into(),
            is_favorite: None,
        }
    }

    #[test]
    fn empty_text_suggests_nothing() {
        assert!(suggestions(&[item("Tech", "technology")], "").is_empty());
    }

    #[test]
    fn titles_then_categories_deduplicated() {
        let items = vec![
            item("Tech rally", "technology"),
            item("New tech hub", "technology"),
            item("Tech layoffs", "business"),
            item("Tech ethics", "technology"),
        ];
        assert_eq!(
            suggestions(&items, "TECH"),
            vec!["Tech rally", "New tech hub", "Tech layoffs", "technology"]
        );
    }

    #[test]
    fn capped_at_five() {
        let items: Vec<_> = (0..4)
            .map(|i| item(&format!("sports {i}"), &format!("sports-{i}")))
            .collect();
        let out = suggestions(&items, "sports");
        assert_eq!(out.len(), 5);
        assert_eq!(out[3], "sports-0");
        assert_eq!(out[4], "sports-1");
    }
}
