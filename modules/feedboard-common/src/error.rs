use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Unknown date range: {0}")]
    UnknownDateRange(String),
}
