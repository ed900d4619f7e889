use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token claims.
///
/// Every field is required: a token missing any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email at issue time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account, valid for `ttl` from `issued_at`.
    ///
    /// # Arguments
    /// * `account_id` - Unique account identifier
    /// * `email` - Account email address
    /// * `issued_at` - Issue instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl`
    pub fn for_account(
        account_id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
