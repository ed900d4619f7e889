use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::short_url::errors::ShortUrlError;
use crate::short_url::models::CreateShortUrlCommand;
use crate::short_url::models::ShortCode;
use crate::short_url::models::ShortUrl;
use crate::short_url::models::ShortUrlId;
use crate::short_url::models::UpdateShortUrlCommand;

/// Port for short URL management and resolution.
#[async_trait]
pub trait ShortUrlServicePort: Send + Sync + 'static {
    /// Create a short URL owned by the caller.
    ///
    /// # Errors
    /// * `ShortCodeAlreadyExists` - Code is taken
    /// * `DatabaseError` - Database operation failed
    async fn create_short_url(
        &self,
        owner: &AccountId,
        command: CreateShortUrlCommand,
    ) -> Result<ShortUrl, ShortUrlError>;

    /// List the caller's short URLs, newest first.
    async fn list_short_urls(&self, owner: &AccountId) -> Result<Vec<ShortUrl>, ShortUrlError>;

    /// Retrieve one of the caller's short URLs.
    ///
    /// # Errors
    /// * `NotFound` - Short URL does not exist
    /// * `Forbidden` - Short URL belongs to another account
    async fn get_short_url(
        &self,
        owner: &AccountId,
        id: &ShortUrlId,
    ) -> Result<ShortUrl, ShortUrlError>;

    /// Change the code and/or target of one of the caller's short URLs.
    ///
    /// # Errors
    /// * `NotFound` - Short URL does not exist
    /// * `Forbidden` - Short URL belongs to another account
    /// * `ShortCodeAlreadyExists` - New code is taken
    async fn update_short_url(
        &self,
        owner: &AccountId,
        id: &ShortUrlId,
        command: UpdateShortUrlCommand,
    ) -> Result<ShortUrl, ShortUrlError>;

    /// Delete one of the caller's short URLs.
    ///
    /// # Errors
    /// * `NotFound` - Short URL does not exist
    /// * `Forbidden` - Short URL belongs to another account
    async fn delete_short_url(&self, owner: &AccountId, id: &ShortUrlId)
        -> Result<(), ShortUrlError>;

    /// Resolve a public short code to its long URL.
    ///
    /// # Errors
    /// * `NotFound` - No short URL uses this code
    async fn resolve(&self, short_code: &ShortCode) -> Result<ShortUrl, ShortUrlError>;
}

/// Persistence operations for short URLs.
#[async_trait]
pub trait ShortUrlRepository: Send + Sync + 'static {
    /// Persist a new short URL.
    ///
    /// # Errors
    /// * `ShortCodeAlreadyExists` - Code is taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, short_url: ShortUrl) -> Result<ShortUrl, ShortUrlError>;

    async fn find_by_id(&self, id: &ShortUrlId) -> Result<Option<ShortUrl>, ShortUrlError>;

    async fn find_by_short_code(
        &self,
        short_code: &ShortCode,
    ) -> Result<Option<ShortUrl>, ShortUrlError>;

    /// All short URLs of an account ordered by `created_at` descending.
    async fn list_by_owner(&self, owner: &AccountId) -> Result<Vec<ShortUrl>, ShortUrlError>;

    /// Overwrite an existing short URL.
    ///
    /// # Errors
    /// * `NotFound` - Short URL does not exist
    /// * `ShortCodeAlreadyExists` - New code is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, short_url: ShortUrl) -> Result<ShortUrl, ShortUrlError>;

    /// # Errors
    /// * `NotFound` - Short URL does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ShortUrlId) -> Result<(), ShortUrlError>;
}
