use thiserror::Error;

/// Error for ShortUrlId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortUrlIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ShortCode validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortCodeError {
    #[error("Short code is empty")]
    Empty,

    #[error("Short code too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Short code contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Error for LongUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LongUrlError {
    #[error("Invalid URL: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Top-level error for short URL operations
#[derive(Debug, Clone, Error)]
pub enum ShortUrlError {
    #[error("Invalid short URL ID: {0}")]
    InvalidId(#[from] ShortUrlIdError),

    #[error("Invalid short code: {0}")]
    InvalidShortCode(#[from] ShortCodeError),

    #[error("Invalid long URL: {0}")]
    InvalidLongUrl(#[from] LongUrlError),

    #[error("Short URL not found: {0}")]
    NotFound(String),

    #[error("Short code already exists: {0}")]
    ShortCodeAlreadyExists(String),

    #[error("Access to short URL {0} denied")]
    Forbidden(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
