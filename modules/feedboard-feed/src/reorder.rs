//! Manual reorder of the materialized view.

use feedboard_common::ContentItem;

/// Move the element at `old_index` to `new_index`, shifting the rest.
///
/// Returns `false` and leaves the view untouched when either index is out
/// of range. The canonical items are never involved: the next recompute
/// discards whatever order this produced.
pub fn reorder(view: &mut Vec<ContentItem>, old_index: usize, new_index: usize) -> bool {
    if old_index >= view.len() || new_index >= view.len() {
        return false;
    }
    let moved = view.remove(old_index);
    view.insert(new_index, moved);
    true
}
