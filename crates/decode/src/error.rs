use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("record pattern has no named capture groups")]
    NoNamedCaptures,
}
