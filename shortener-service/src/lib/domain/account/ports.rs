use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::UpdateAccountCommand;

/// Port for account self-service operations.
///
/// Every operation takes the authenticated caller and refuses to touch any
/// other account.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Retrieve an account.
    ///
    /// # Errors
    /// * `Forbidden` - `id` is not the caller
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, caller: &AccountId, id: &AccountId)
        -> Result<Account, AccountError>;

    /// Update email and/or password of an account.
    ///
    /// # Errors
    /// * `Forbidden` - `id` is not the caller
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Password` - Hashing the new password failed
    /// * `DatabaseError` - Database operation failed
    async fn update_account(
        &self,
        caller: &AccountId,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Delete an account together with everything it owns.
    ///
    /// # Errors
    /// * `Forbidden` - `id` is not the caller
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, caller: &AccountId, id: &AccountId)
        -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate (the user directory).
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact email match.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Overwrite an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Remove an account and cascade to its refresh tokens and short URLs.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
