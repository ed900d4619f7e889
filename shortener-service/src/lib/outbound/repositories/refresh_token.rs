use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::authentication::errors::AuthError;
use crate::authentication::models::RefreshToken;
use crate::authentication::ports::RefreshTokenLedger;

#[derive(Debug, FromRow)]
struct RefreshTokenRow {
    token: String,
    account_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    revoked: bool,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshToken {
            token: row.token,
            account_id: AccountId(row.account_id),
            created_at: row.created_at,
            expires_at: row.expires_at,
            revoked: row.revoked,
        }
    }
}

/// Refresh token ledger backed by the `refresh_tokens` table.
pub struct PostgresRefreshTokenLedger {
    pool: PgPool,
}

impl PostgresRefreshTokenLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenLedger for PostgresRefreshTokenLedger {
    async fn insert(
        &self,
        account_id: &AccountId,
        ttl: Duration,
    ) -> Result<RefreshToken, AuthError> {
        let refresh_token = RefreshToken::generate(*account_id, ttl);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, account_id, created_at, expires_at, revoked)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&refresh_token.token)
        .bind(refresh_token.account_id.0)
        .bind(refresh_token.created_at)
        .bind(refresh_token.expires_at)
        .bind(refresh_token.revoked)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StoreFailure(e.to_string()))?;

        Ok(refresh_token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT token, account_id, created_at, expires_at, revoked
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StoreFailure(e.to_string()))?;

        Ok(row.map(RefreshToken::from))
    }

    async fn mark_revoked(&self, token: &str) -> Result<(), AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StoreFailure(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::InvalidToken);
        }

        Ok(())
    }
}
