use thiserror::Error;

use crate::account::errors::AccountError;
use crate::account::errors::EmailError;

/// Errors raised by registration, login and the token lifecycle.
///
/// The first five variants are client-facing and map to fixed HTTP statuses.
/// The remaining variants are internal faults that surface as an opaque 500.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use: {0}")]
    EmailInUse(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Token signing failed: {0}")]
    SigningFailure(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl From<AccountError> for AuthError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailAlreadyExists(email) => AuthError::EmailInUse(email),
            AccountError::InvalidEmail(e) => AuthError::InvalidEmail(e),
            AccountError::Password(e) => AuthError::HashingFailure(e.to_string()),
            AccountError::NotFound(_)
            | AccountError::Forbidden(_)
            | AccountError::InvalidAccountId(_)
            | AccountError::DatabaseError(_) => AuthError::StoreFailure(err.to_string()),
        }
    }
}
