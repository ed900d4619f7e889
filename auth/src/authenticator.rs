use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Well-formed Argon2id digest (default cost parameters) that no password
/// verifies against.
const PLACEHOLDER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and access
/// token issuing.
///
/// Holds the signing keys and the access token lifetime; both are fixed at
/// construction and never change afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    /// * `access_token_ttl` - Lifetime of every issued access token
    pub fn new(jwt_secret: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            access_token_ttl,
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash unusable or verification failed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
                other => AuthenticationError::PasswordError(other),
            })
    }

    /// Run a full password verification against a placeholder digest.
    ///
    /// Used when no account matches the login email so that the rejection
    /// costs as much as a wrong password. Always fails.
    pub fn verify_placeholder(&self, password: &str) -> Result<(), AuthenticationError> {
        self.verify_password(password, PLACEHOLDER_HASH)
    }

    /// Verify credentials and issue an access token for the account.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `account_id` - Token subject
    /// * `email` - Email claim
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: impl ToString,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_password(password, stored_hash)?;

        let access_token = self.issue_access_token(account_id, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the refresh token is the credential.
    pub fn issue_access_token(
        &self,
        account_id: impl ToString,
        email: &str,
    ) -> Result<String, JwtError> {
        self.issue_access_token_at(Utc::now(), account_id, email)
    }

    /// Issue an access token as if it had been issued at `issued_at`.
    pub fn issue_access_token_at(
        &self,
        issued_at: DateTime<Utc>,
        account_id: impl ToString,
        email: &str,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_account(account_id, email, issued_at, self.access_token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode an access token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token was signed by us but has expired
    /// * `InvalidToken` - Any other validation failure
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::minutes(15))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "Secret1!";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "acc-123", "a@x.com")
            .expect("Authentication failed");

        let decoded = authenticator
            .validate_access_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "acc-123");
        assert_eq!(decoded.email, "a@x.com");
        assert_eq!(decoded.exp - decoded.iat, 15 * 60);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("Secret1!")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("WrongPass", &hash, "acc-123", "a@x.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_hash_is_not_invalid_credentials() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("Secret1!", "not-a-phc-string", "acc-123", "a@x.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(PasswordError::InvalidHash(_)))
        ));
    }

    #[test]
    fn test_placeholder_runs_a_real_verification_and_fails() {
        let authenticator = authenticator();

        for password in ["", "Secret1!", "password"] {
            assert!(matches!(
                authenticator.verify_placeholder(password),
                Err(AuthenticationError::InvalidCredentials)
            ));
        }
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_access_token_at(Utc::now() - Duration::minutes(16), "acc-123", "a@x.com")
            .unwrap();

        assert_eq!(
            authenticator.validate_access_token(&token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let ours = authenticator();
        let theirs = Authenticator::new(b"some_other_secret_of_32_bytes_len!", Duration::minutes(15));

        let token = theirs.issue_access_token("acc-123", "a@x.com").unwrap();

        assert!(matches!(
            ours.validate_access_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_access_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
