use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::models::AccountId;
use crate::short_url::errors::ShortUrlError;
use crate::short_url::models::CreateShortUrlCommand;
use crate::short_url::models::ShortCode;
use crate::short_url::models::ShortUrl;
use crate::short_url::models::ShortUrlId;
use crate::short_url::models::UpdateShortUrlCommand;
use crate::short_url::ports::ShortUrlRepository;
use crate::short_url::ports::ShortUrlServicePort;

/// Domain service implementation for short URLs.
pub struct ShortUrlService<SR>
where
    SR: ShortUrlRepository,
{
    repository: Arc<SR>,
}

impl<SR> ShortUrlService<SR>
where
    SR: ShortUrlRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }

    /// Load a short URL and check that `owner` holds it.
    async fn find_owned(
        &self,
        owner: &AccountId,
        id: &ShortUrlId,
    ) -> Result<ShortUrl, ShortUrlError> {
        let short_url = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ShortUrlError::NotFound(id.to_string()))?;

        if short_url.owner_id != *owner {
            tracing::warn!(caller = %owner, short_url_id = %id, "Cross-account access refused");
            return Err(ShortUrlError::Forbidden(id.to_string()));
        }

        Ok(short_url)
    }
}

#[async_trait]
impl<SR> ShortUrlServicePort for ShortUrlService<SR>
where
    SR: ShortUrlRepository,
{
    async fn create_short_url(
        &self,
        owner: &AccountId,
        command: CreateShortUrlCommand,
    ) -> Result<ShortUrl, ShortUrlError> {
        let short_url = ShortUrl::new(command.short_code, command.long_url, *owner);
        let created = self.repository.create(short_url).await?;

        tracing::info!(short_url_id = %created.id, short_code = %created.short_code, "Short URL created");

        Ok(created)
    }

    async fn list_short_urls(&self, owner: &AccountId) -> Result<Vec<ShortUrl>, ShortUrlError> {
        self.repository.list_by_owner(owner).await
    }

    async fn get_short_url(
        &self,
        owner: &AccountId,
        id: &ShortUrlId,
    ) -> Result<ShortUrl, ShortUrlError> {
        self.find_owned(owner, id).await
    }

    async fn update_short_url(
        &self,
        owner: &AccountId,
        id: &ShortUrlId,
        command: UpdateShortUrlCommand,
    ) -> Result<ShortUrl, ShortUrlError> {
        let mut short_url = self.find_owned(owner, id).await?;

        if let Some(short_code) = command.short_code {
            short_url.short_code = short_code;
        }
        if let Some(long_url) = command.long_url {
            short_url.long_url = long_url;
        }
        short_url.updated_at = Utc::now();

        let updated = self.repository.update(short_url).await?;
        tracing::info!(short_url_id = %updated.id, "Short URL updated");

        Ok(updated)
    }

    async fn delete_short_url(
        &self,
        owner: &AccountId,
        id: &ShortUrlId,
    ) -> Result<(), ShortUrlError> {
        self.find_owned(owner, id).await?;
        self.repository.delete(id).await?;

        tracing::info!(short_url_id = %id, "Short URL deleted");

        Ok(())
    }

    async fn resolve(&self, short_code: &ShortCode) -> Result<ShortUrl, ShortUrlError> {
        self.repository
            .find_by_short_code(short_code)
            .await?
            .ok_or(ShortUrlError::NotFound(short_code.to_string()))
    }
}
