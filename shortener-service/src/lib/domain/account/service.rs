use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::UpdateAccountCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account self-service.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn ensure_owner(caller: &AccountId, id: &AccountId) -> Result<(), AccountError> {
        if caller != id {
            tracing::warn!(caller = %caller, target_account = %id, "Cross-account access refused");
            return Err(AccountError::Forbidden(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn get_account(
        &self,
        caller: &AccountId,
        id: &AccountId,
    ) -> Result<Account, AccountError> {
        Self::ensure_owner(caller, id)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_account(
        &self,
        caller: &AccountId,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        Self::ensure_owner(caller, id)?;

        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            account.email = new_email;
        }

        if let Some(new_password) = command.password {
            account.password_hash = self.password_hasher.hash(&new_password)?;
        }

        account.updated_at = Utc::now();

        let updated = self.repository.update(account).await?;
        tracing::info!(account_id = %updated.id, "Account updated");

        Ok(updated)
    }

    async fn delete_account(&self, caller: &AccountId, id: &AccountId) -> Result<(), AccountError> {
        Self::ensure_owner(caller, id)?;

        self.repository.delete(id).await?;
        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
