use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::ports::AccountRepository;
use crate::authentication::errors::AuthError;
use crate::authentication::models::RefreshToken;
use crate::authentication::ports::RefreshTokenLedger;
use crate::short_url::errors::ShortUrlError;
use crate::short_url::models::ShortCode;
use crate::short_url::models::ShortUrl;
use crate::short_url::models::ShortUrlId;
use crate::short_url::ports::ShortUrlRepository;

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    refresh_tokens: HashMap<String, RefreshToken>,
    short_urls: HashMap<ShortUrlId, ShortUrl>,
}

/// Process-local store implementing every persistence port.
///
/// All three tables sit behind one lock so uniqueness checks and the
/// account delete cascade happen atomically. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut tables = self.tables.write().await;

        if tables
            .accounts
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }

        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.tables.read().await.accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .tables
            .read()
            .await
            .accounts
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut tables = self.tables.write().await;

        if !tables.accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }
        if tables
            .accounts
            .values()
            .any(|existing| existing.id != account.id && existing.email == account.email)
        {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }

        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let mut tables = self.tables.write().await;

        if tables.accounts.remove(id).is_none() {
            return Err(AccountError::NotFound(id.to_string()));
        }
        tables
            .refresh_tokens
            .retain(|_, token| token.account_id != *id);
        tables
            .short_urls
            .retain(|_, short_url| short_url.owner_id != *id);

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenLedger for InMemoryStore {
    async fn insert(
        &self,
        account_id: &AccountId,
        ttl: Duration,
    ) -> Result<RefreshToken, AuthError> {
        let refresh_token = RefreshToken::generate(*account_id, ttl);

        self.tables
            .write()
            .await
            .refresh_tokens
            .insert(refresh_token.token.clone(), refresh_token.clone());

        Ok(refresh_token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.tables.read().await.refresh_tokens.get(token).cloned())
    }

    async fn mark_revoked(&self, token: &str) -> Result<(), AuthError> {
        match self.tables.write().await.refresh_tokens.get_mut(token) {
            Some(record) => {
                record.revoked = true;
                Ok(())
            }
            None => Err(AuthError::InvalidToken),
        }
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryStore {
    async fn create(&self, short_url: ShortUrl) -> Result<ShortUrl, ShortUrlError> {
        let mut tables = self.tables.write().await;

        if tables
            .short_urls
            .values()
            .any(|existing| existing.short_code == short_url.short_code)
        {
            return Err(ShortUrlError::ShortCodeAlreadyExists(
                short_url.short_code.to_string(),
            ));
        }

        tables.short_urls.insert(short_url.id, short_url.clone());
        Ok(short_url)
    }

    async fn find_by_id(&self, id: &ShortUrlId) -> Result<Option<ShortUrl>, ShortUrlError> {
        Ok(self.tables.read().await.short_urls.get(id).cloned())
    }

    async fn find_by_short_code(
        &self,
        short_code: &ShortCode,
    ) -> Result<Option<ShortUrl>, ShortUrlError> {
        Ok(self
            .tables
            .read()
            .await
            .short_urls
            .values()
            .find(|short_url| short_url.short_code == *short_code)
            .cloned())
    }

    async fn list_by_owner(&self, owner: &AccountId) -> Result<Vec<ShortUrl>, ShortUrlError> {
        let mut owned: Vec<ShortUrl> = self
            .tables
            .read()
            .await
            .short_urls
            .values()
            .filter(|short_url| short_url.owner_id == *owner)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, short_url: ShortUrl) -> Result<ShortUrl, ShortUrlError> {
        let mut tables = self.tables.write().await;

        if !tables.short_urls.contains_key(&short_url.id) {
            return Err(ShortUrlError::NotFound(short_url.id.to_string()));
        }
        if tables.short_urls.values().any(|existing| {
            existing.id != short_url.id && existing.short_code == short_url.short_code
        }) {
            return Err(ShortUrlError::ShortCodeAlreadyExists(
                short_url.short_code.to_string(),
            ));
        }

        tables.short_urls.insert(short_url.id, short_url.clone());
        Ok(short_url)
    }

    async fn delete(&self, id: &ShortUrlId) -> Result<(), ShortUrlError> {
        match self.tables.write().await.short_urls.remove(id) {
            Some(_) => Ok(()),
            None => Err(ShortUrlError::NotFound(id.to_string())),
        }
    }
}
