// Error types for repocards.
// Covers upstream HTTP failures, cache corruption, and card configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardsError {
    #[error("GitHub API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("GitHub API request error! Status: {status} ({url})")]
    Status { status: u16, url: String },

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid '{0}' attribute in card request")]
    MissingAttribute(&'static str),

    #[error("Invalid '{attribute}' attribute '{value}'. Must be one of: {allowed}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        allowed: String,
    },

    #[error("The caching flag must be 'true' or 'false', got {0:?}")]
    InvalidCachingFlag(Option<String>),

    #[error("Repo cards were already started; start must be called exactly once")]
    AlreadyStarted,

    #[error("Repo cards have not been started")]
    NotStarted,

    #[error("Corrupt cache entry '{key}' was removed: {reason}")]
    CorruptCacheEntry { key: String, reason: String },

    #[error("Could not determine a cache directory")]
    NoCacheDir,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CardsError>;
