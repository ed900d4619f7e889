use thiserror::Error;

/// Error type for JWT operations.
///
/// Only `TokenExpired` is distinguishable from a plain invalid token; every
/// other decoding failure collapses into `InvalidToken`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
