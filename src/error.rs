use thiserror::Error;

#[derive(Error, Debug)]
pub enum RallyError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Snapshot Validation Error: {0}")]
    Validation(String),
}

pub type RtResult<T> = Result<T, RallyError>;
