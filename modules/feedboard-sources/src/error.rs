use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("publish time {offset} steps back from now is out of range")]
    TimestampOutOfRange { offset: u64 },

    #[error("unknown content type: {0}")]
    UnknownType(String),
}
