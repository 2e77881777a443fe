use std::cmp::Reverse;

use feedboard_common::{ContentItem, SortKey};

/// Sort the view in place. Every ordering is stable, so ties keep their
/// input order; an unrecognised key leaves the slice untouched.
///
/// `relevance` scores an item for [`SortKey::Relevance`]; higher first.
pub(crate) fn sort_items<F>(items: &mut [ContentItem], key: &SortKey, relevance: F)
where
    F: Fn(&ContentItem) -> u32,
{
    match key {
        SortKey::Newest => items.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortKey::Oldest => items.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        SortKey::Relevance => items.sort_by_cached_key(|item| Reverse(relevance(item))),
        SortKey::Popular => items.sort_by_key(|item| Reverse(item.content_type.popularity())),
        SortKey::Unrecognized(_) => {}
    }
}
