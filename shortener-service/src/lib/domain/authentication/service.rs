use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use chrono::Duration;
use chrono::Utc;

use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::authentication::errors::AuthError;
use crate::authentication::models::AccessClaims;
use crate::authentication::models::TokenPair;
use crate::authentication::ports::AuthServicePort;
use crate::authentication::ports::RefreshTokenLedger;

/// Domain service for registration, login and the token lifecycle.
///
/// Holds no mutable state: the signing keys and both TTLs are fixed at
/// construction, everything durable lives behind the two ports.
pub struct AuthService<AR, RL>
where
    AR: AccountRepository,
    RL: RefreshTokenLedger,
{
    accounts: Arc<AR>,
    refresh_tokens: Arc<RL>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<AR, RL> AuthService<AR, RL>
where
    AR: AccountRepository,
    RL: RefreshTokenLedger,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account directory
    /// * `refresh_tokens` - Refresh token ledger
    /// * `authenticator` - Password hasher and access token issuer
    /// * `refresh_token_ttl` - Lifetime of refresh tokens minted at login
    pub fn new(
        accounts: Arc<AR>,
        refresh_tokens: Arc<RL>,
        authenticator: Arc<Authenticator>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            authenticator,
            refresh_token_ttl,
        }
    }

    fn issue_access_token(&self, account: &Account) -> Result<String, AuthError> {
        self.authenticator
            .issue_access_token(account.id, account.email.as_str())
            .map_err(|e| AuthError::SigningFailure(e.to_string()))
    }
}

#[async_trait]
impl<AR, RL> AuthServicePort for AuthService<AR, RL>
where
    AR: AccountRepository,
    RL: RefreshTokenLedger,
{
    async fn register(&self, email: EmailAddress, password: &str) -> Result<Account, AuthError> {
        if self
            .accounts
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailInUse(email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(password)
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?;

        // A concurrent register for the same email loses here on the unique
        // constraint and comes back as EmailInUse.
        let account = self
            .accounts
            .create(Account::new(email, password_hash))
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(account)
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            // Same Argon2 work as a wrong password.
            let _ = self.authenticator.verify_placeholder(password);
            tracing::debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                password,
                &account.password_hash,
                account.id,
                account.email.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(account_id = %account.id, "Login rejected: wrong password");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    AuthError::HashingFailure(err.to_string())
                }
                AuthenticationError::JwtError(err) => AuthError::SigningFailure(err.to_string()),
            })?;

        let refresh_token = self
            .refresh_tokens
            .insert(&account.id, self.refresh_token_ttl)
            .await?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(TokenPair {
            access_token: result.access_token,
            refresh_token: refresh_token.token,
        })
    }

    fn validate_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        self.authenticator
            .validate_access_token(token)
            .map_err(|e| match e {
                JwtError::TokenExpired => AuthError::ExpiredToken,
                JwtError::InvalidToken(_) | JwtError::EncodingFailed(_) => AuthError::InvalidToken,
            })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let record = self
            .refresh_tokens
            .find_by_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // Revocation is checked before expiry so a revoked token is always
        // reported as invalid.
        if record.revoked {
            tracing::warn!(account_id = %record.account_id, "Refresh with revoked token");
            return Err(AuthError::InvalidToken);
        }

        if record.is_expired_at(Utc::now()) {
            tracing::debug!(account_id = %record.account_id, "Refresh with expired token");
            return Err(AuthError::ExpiredToken);
        }

        let account = self
            .accounts
            .find_by_id(&record.account_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(account_id = %record.account_id, "Refresh token owner no longer exists");
                AuthError::InvalidToken
            })?;

        let access_token = self.issue_access_token(&account)?;
        tracing::debug!(account_id = %account.id, "Access token refreshed");

        Ok(access_token)
    }

    async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.refresh_tokens.mark_revoked(refresh_token).await?;
        tracing::info!("Refresh token revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use mockall::mock;

    use super::*;
    use crate::account::errors::AccountError;
    use crate::account::models::AccountId;
    use crate::authentication::models::RefreshToken;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn update(&self, account: Account) -> Result<Account, AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestRefreshTokenLedger {}

        #[async_trait]
        impl RefreshTokenLedger for TestRefreshTokenLedger {
            async fn insert(&self, account_id: &AccountId, ttl: Duration) -> Result<RefreshToken, AuthError>;
            async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;
            async fn mark_revoked(&self, token: &str) -> Result<(), AuthError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::minutes(15)))
    }

    fn service(
        accounts: MockTestAccountRepository,
        ledger: MockTestRefreshTokenLedger,
    ) -> AuthService<MockTestAccountRepository, MockTestRefreshTokenLedger> {
        AuthService::new(
            Arc::new(accounts),
            Arc::new(ledger),
            authenticator(),
            Duration::hours(24),
        )
    }

    fn account_with_password(password: &str) -> Account {
        let hash = authenticator().hash_password(password).unwrap();
        Account::new(EmailAddress::new("a@x.com".to_string()).unwrap(), hash)
    }

    fn live_refresh_token(account_id: AccountId) -> RefreshToken {
        RefreshToken::generate(account_id, Duration::hours(24))
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(None));
        accounts
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "a@x.com"
                    && account.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(Ok);

        let ledger = MockTestRefreshTokenLedger::new();
        let service = service(accounts, ledger);

        let account = service
            .register(EmailAddress::new("a@x.com".to_string()).unwrap(), "Secret1!")
            .await
            .unwrap();

        assert_eq!(account.email.as_str(), "a@x.com");
        assert_ne!(account.password_hash, "Secret1!");
    }

    #[tokio::test]
    async fn test_register_existing_email_is_email_in_use() {
        let mut accounts = MockTestAccountRepository::new();
        let existing = account_with_password("Secret1!");
        accounts
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        accounts.expect_create().times(0);

        let service = service(accounts, MockTestRefreshTokenLedger::new());

        let result = service
            .register(EmailAddress::new("a@x.com".to_string()).unwrap(), "Other1!")
            .await;
        assert!(matches!(result, Err(AuthError::EmailInUse(_))));
    }

    #[tokio::test]
    async fn test_register_losing_unique_race_is_email_in_use() {
        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts
            .expect_create()
            .times(1)
            .returning(|account| Err(AccountError::EmailAlreadyExists(account.email.to_string())));

        let service = service(accounts, MockTestRefreshTokenLedger::new());

        let result = service
            .register(EmailAddress::new("a@x.com".to_string()).unwrap(), "Secret1!")
            .await;
        assert!(matches!(result, Err(AuthError::EmailInUse(_))));
    }

    #[tokio::test]
    async fn test_register_store_failure() {
        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));

        let service = service(accounts, MockTestRefreshTokenLedger::new());

        let result = service
            .register(EmailAddress::new("a@x.com".to_string()).unwrap(), "Secret1!")
            .await;
        assert!(matches!(result, Err(AuthError::StoreFailure(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_both_tokens() {
        let account = account_with_password("Secret1!");
        let account_id = account.id;

        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_insert()
            .withf(move |id, ttl| *id == account_id && *ttl == Duration::hours(24))
            .times(1)
            .returning(|id, ttl| Ok(RefreshToken::generate(*id, ttl)));

        let service = service(accounts, ledger);

        let tokens = service.login("a@x.com", "Secret1!").await.unwrap();
        assert!(!tokens.refresh_token.is_empty());

        let claims = service.validate_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[tokio::test]
    async fn test_login_wrong_password_matches_unknown_email() {
        let account = account_with_password("Secret1!");

        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(move |email| {
                if email == "a@x.com" {
                    Ok(Some(account.clone()))
                } else {
                    Ok(None)
                }
            });

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger.expect_insert().times(0);

        let service = service(accounts, ledger);

        let wrong_password = service.login("a@x.com", "WrongPass").await.unwrap_err();
        let unknown_email = service
            .login("nobody@x.com", "Whatever1!")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_unknown_email_costs_a_password_verification() {
        let account = account_with_password("Secret1!");

        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(move |email| {
                if email == "a@x.com" {
                    Ok(Some(account.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = service(accounts, MockTestRefreshTokenLedger::new());

        let started = Instant::now();
        let _ = service.login("a@x.com", "WrongPass").await;
        let wrong_password = started.elapsed();

        let started = Instant::now();
        let _ = service.login("nobody@x.com", "WrongPass").await;
        let unknown_email = started.elapsed();

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {:?}, wrong password took {:?}",
            unknown_email,
            wrong_password
        );
    }

    #[tokio::test]
    async fn test_validate_token_from_other_secret_is_invalid() {
        let service = service(
            MockTestAccountRepository::new(),
            MockTestRefreshTokenLedger::new(),
        );
        let foreign = Authenticator::new(b"a-completely-different-secret-32-bytes", Duration::minutes(15))
            .issue_access_token(AccountId::new(), "a@x.com")
            .unwrap();

        assert!(matches!(
            service.validate_token(&foreign),
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_validate_token_after_ttl_is_expired() {
        let service = service(
            MockTestAccountRepository::new(),
            MockTestRefreshTokenLedger::new(),
        );
        let stale = authenticator()
            .issue_access_token_at(Utc::now() - Duration::minutes(16), AccountId::new(), "a@x.com")
            .unwrap();

        assert!(matches!(
            service.validate_token(&stale),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_issues_token_for_owner_without_touching_record() {
        let account = account_with_password("Secret1!");
        let account_id = account.id;
        let record = live_refresh_token(account_id);
        let presented = record.token.clone();

        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(3)
            .returning(move |_| Ok(Some(account.clone())));

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_find_by_token()
            .times(3)
            .returning(move |_| Ok(Some(record.clone())));
        ledger.expect_insert().times(0);
        ledger.expect_mark_revoked().times(0);

        let service = service(accounts, ledger);

        for _ in 0..3 {
            let access_token = service.refresh_access_token(&presented).await.unwrap();
            let claims = service.validate_token(&access_token).unwrap();
            assert_eq!(claims.sub, account_id.to_string());
        }
    }

    #[tokio::test]
    async fn test_refresh_unknown_token_is_invalid() {
        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger.expect_find_by_token().returning(|_| Ok(None));

        let service = service(MockTestAccountRepository::new(), ledger);

        assert!(matches!(
            service.refresh_access_token("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_revoked_token_is_invalid() {
        let mut revoked = live_refresh_token(AccountId::new());
        revoked.revoked = true;

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_find_by_token()
            .returning(move |_| Ok(Some(revoked.clone())));

        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_find_by_id().times(0);

        let service = service(accounts, ledger);

        assert!(matches!(
            service.refresh_access_token("whatever").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_revoked_and_expired_token_is_invalid() {
        let mut record = live_refresh_token(AccountId::new());
        record.revoked = true;
        record.created_at = Utc::now() - Duration::hours(48);
        record.expires_at = Utc::now() - Duration::hours(24);

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_find_by_token()
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(MockTestAccountRepository::new(), ledger);

        assert!(matches!(
            service.refresh_access_token("whatever").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_expired_token_is_expired() {
        let mut record = live_refresh_token(AccountId::new());
        record.created_at = Utc::now() - Duration::hours(25);
        record.expires_at = Utc::now() - Duration::hours(1);

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_find_by_token()
            .returning(move |_| Ok(Some(record.clone())));

        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_find_by_id().times(0);

        let service = service(accounts, ledger);

        assert!(matches!(
            service.refresh_access_token("whatever").await,
            Err(AuthError::ExpiredToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_account_is_invalid() {
        let record = live_refresh_token(AccountId::new());

        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_find_by_token()
            .returning(move |_| Ok(Some(record.clone())));

        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(accounts, ledger);

        assert!(matches!(
            service.refresh_access_token("whatever").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_revoke_delegates_to_ledger() {
        let mut ledger = MockTestRefreshTokenLedger::new();
        ledger
            .expect_mark_revoked()
            .withf(|token| token == "abc")
            .times(1)
            .returning(|_| Ok(()));
        ledger
            .expect_mark_revoked()
            .withf(|token| token == "unknown")
            .times(1)
            .returning(|_| Err(AuthError::InvalidToken));

        let service = service(MockTestAccountRepository::new(), ledger);

        assert!(service.revoke_refresh_token("abc").await.is_ok());
        assert!(matches!(
            service.revoke_refresh_token("unknown").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
