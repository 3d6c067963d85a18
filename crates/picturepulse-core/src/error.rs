use thiserror::Error;

#[derive(Debug, Error)]
pub enum PulseError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("rating error: {0}")]
    Rating(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
