use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::account::models::AccountId;

/// Decoded access token payload.
pub type AccessClaims = auth::Claims;

/// Number of random bytes behind every refresh token string.
const REFRESH_TOKEN_BYTES: usize = 32;

/// Persisted refresh token record.
///
/// The token string is the primary key. Records are never rotated or
/// extended; only the `revoked` flag may change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    /// Mint a fresh, unrevoked refresh token for an account.
    ///
    /// # Arguments
    /// * `account_id` - Owning account
    /// * `ttl` - Lifetime; `expires_at = created_at + ttl`
    pub fn generate(account_id: AccountId, ttl: Duration) -> Self {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let created_at = Utc::now();
        Self {
            token: URL_SAFE_NO_PAD.encode(bytes),
            account_id,
            created_at,
            expires_at: created_at + ttl,
            revoked: false,
        }
    }

    /// A token is expired once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Tokens handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
