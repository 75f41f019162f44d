use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Session bootstrap failed: {0}")]
    Bootstrap(String),
    #[error("Offer catalog unavailable: {0}")]
    Fetch(String),
    #[error("Campaign details unavailable: {0}")]
    Enrichment(String),
    #[error("Payout rejected: {0}")]
    Payout(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
