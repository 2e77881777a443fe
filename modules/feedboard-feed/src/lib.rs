//! The feed core: the canonical item store, the criteria that shape it,
//! and the pure pipeline that derives the materialized view.
//!
//! ```text
//! fetch completions ──► store::merge_page ──► items (canonical)
//!                                               │
//! criteria events ──► FeedState criteria ──► pipeline::derive_view
//!                                               │
//!                                               ▼
//!                                   view (materialized) ◄── reorder
//! ```
//!
//! All mutation goes through [`FeedReducer`]; the view is recomputed from
//! the canonical items after every criteria or store change. A manual
//! reorder permutes the view in place and lasts until the next recompute.

pub mod clock;
pub mod pipeline;
pub mod reducer;
pub mod reorder;
pub mod state;
pub mod store;
pub mod suggest;

pub use clock::{Clock, FixedClock, SystemClock};
pub use pipeline::{apply_advanced_search, apply_filters_and_sort, derive_view};
pub use reducer::FeedReducer;
pub use state::FeedState;
pub use suggest::suggestions;
