use async_trait::async_trait;
use chrono::Duration;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::authentication::errors::AuthError;
use crate::authentication::models::AccessClaims;
use crate::authentication::models::RefreshToken;
use crate::authentication::models::TokenPair;

/// Port for the authentication service.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a new account. Does not log the account in.
    ///
    /// # Errors
    /// * `EmailInUse` - An account with this email already exists
    /// * `HashingFailure` - Password hashing failed
    /// * `StoreFailure` - Persistence failed
    async fn register(&self, email: EmailAddress, password: &str) -> Result<Account, AuthError>;

    /// Verify credentials and issue an access token plus a new refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `StoreFailure` - Persistence failed
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `ExpiredToken` - Signature valid, expiry passed
    /// * `InvalidToken` - Any other validation failure
    fn validate_token(&self, token: &str) -> Result<AccessClaims, AuthError>;

    /// Issue a new access token from a refresh token. The refresh token
    /// itself is left untouched.
    ///
    /// # Errors
    /// * `InvalidToken` - Unknown or revoked refresh token, or owner gone
    /// * `ExpiredToken` - Refresh token past its expiry
    /// * `StoreFailure` - Persistence failed
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Permanently revoke a refresh token.
    ///
    /// # Errors
    /// * `InvalidToken` - Unknown refresh token
    /// * `StoreFailure` - Persistence failed
    async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<(), AuthError>;
}

/// Persistence for issued refresh tokens.
#[async_trait]
pub trait RefreshTokenLedger: Send + Sync + 'static {
    /// Mint and store a new refresh token for an account.
    ///
    /// # Errors
    /// * `StoreFailure` - Persistence failed
    async fn insert(&self, account_id: &AccountId, ttl: Duration)
        -> Result<RefreshToken, AuthError>;

    /// Look up a refresh token by its token string.
    ///
    /// # Returns
    /// Optional record (None if unknown)
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;

    /// Set the revoked flag on a refresh token.
    ///
    /// # Errors
    /// * `InvalidToken` - Unknown refresh token
    /// * `StoreFailure` - Persistence failed
    async fn mark_revoked(&self, token: &str) -> Result<(), AuthError>;
}
