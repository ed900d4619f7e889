use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::short_url::errors::ShortUrlError;
use crate::short_url::models::LongUrl;
use crate::short_url::models::ShortCode;
use crate::short_url::models::ShortUrl;
use crate::short_url::models::ShortUrlId;
use crate::short_url::ports::ShortUrlRepository;

const SHORT_CODE_UNIQUE_CONSTRAINT: &str = "short_urls_short_code_key";

#[derive(Debug, FromRow)]
struct ShortUrlRow {
    id: Uuid,
    short_code: String,
    long_url: String,
    account_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ShortUrlRow> for ShortUrl {
    type Error = ShortUrlError;

    fn try_from(row: ShortUrlRow) -> Result<Self, Self::Error> {
        Ok(ShortUrl {
            id: ShortUrlId(row.id),
            short_code: ShortCode::new(row.short_code)?,
            long_url: LongUrl::new(row.long_url)?,
            owner_id: AccountId(row.account_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresShortUrlRepository {
    pool: PgPool,
}

impl PostgresShortUrlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, short_url: &ShortUrl) -> ShortUrlError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation()
            && db_err.constraint() == Some(SHORT_CODE_UNIQUE_CONSTRAINT)
        {
            return ShortUrlError::ShortCodeAlreadyExists(short_url.short_code.to_string());
        }
    }
    ShortUrlError::DatabaseError(e.to_string())
}

#[async_trait]
impl ShortUrlRepository for PostgresShortUrlRepository {
    async fn create(&self, short_url: ShortUrl) -> Result<ShortUrl, ShortUrlError> {
        sqlx::query(
            r#"
            INSERT INTO short_urls (id, short_code, long_url, account_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(short_url.id.0)
        .bind(short_url.short_code.as_str())
        .bind(short_url.long_url.as_str())
        .bind(short_url.owner_id.0)
        .bind(short_url.created_at)
        .bind(short_url.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &short_url))?;

        Ok(short_url)
    }

    async fn find_by_id(&self, id: &ShortUrlId) -> Result<Option<ShortUrl>, ShortUrlError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, short_code, long_url, account_id, created_at, updated_at
            FROM short_urls
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShortUrlError::DatabaseError(e.to_string()))?;

        row.map(ShortUrl::try_from).transpose()
    }

    async fn find_by_short_code(
        &self,
        short_code: &ShortCode,
    ) -> Result<Option<ShortUrl>, ShortUrlError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, short_code, long_url, account_id, created_at, updated_at
            FROM short_urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShortUrlError::DatabaseError(e.to_string()))?;

        row.map(ShortUrl::try_from).transpose()
    }

    async fn list_by_owner(&self, owner: &AccountId) -> Result<Vec<ShortUrl>, ShortUrlError> {
        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, short_code, long_url, account_id, created_at, updated_at
            FROM short_urls
            WHERE account_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShortUrlError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ShortUrl::try_from).collect()
    }

    async fn update(&self, short_url: ShortUrl) -> Result<ShortUrl, ShortUrlError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET short_code = $2, long_url = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(short_url.id.0)
        .bind(short_url.short_code.as_str())
        .bind(short_url.long_url.as_str())
        .bind(short_url.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &short_url))?;

        if result.rows_affected() == 0 {
            return Err(ShortUrlError::NotFound(short_url.id.to_string()));
        }

        Ok(short_url)
    }

    async fn delete(&self, id: &ShortUrlId) -> Result<(), ShortUrlError> {
        let result = sqlx::query(
            r#"
            DELETE FROM short_urls
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ShortUrlError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ShortUrlError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
