use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,

    #[error("Stored password hash is invalid: {0}")]
    InvalidHash(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
