//! The feedboard application: a dashboard session wired to the mock
//! sources through the dispatch engine.

pub mod dashboard;
pub mod render;
pub mod router;

pub use dashboard::Dashboard;
pub use router::FeedRouter;
