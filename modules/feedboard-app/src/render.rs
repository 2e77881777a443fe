//! Plain-text and JSON rendering of a view.

use anyhow::Result;
use feedboard_common::ContentItem;

/// One line per item: time, type, title, then category and source.
pub fn render_text(items: &[ContentItem]) -> String {
    if items.is_empty() {
        return "No content found\n".to_string();
    }
    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} [{}] {} ({}, {})\n",
            idx + 1,
            item.published_at.format("%Y-%m-%d %H:%M"),
            item.content_type,
            item.title,
            item.category,
            item.source,
        ));
    }
    out
}

pub fn render_json(items: &[ContentItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}
