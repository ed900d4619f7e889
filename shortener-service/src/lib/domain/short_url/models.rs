use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::short_url::errors::LongUrlError;
use crate::short_url::errors::ShortCodeError;
use crate::short_url::errors::ShortUrlIdError;

/// A short code mapped to a long URL, owned by one account.
#[derive(Debug, Clone)]
pub struct ShortUrl {
    pub id: ShortUrlId,
    pub short_code: ShortCode,
    pub long_url: LongUrl,
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortUrl {
    pub fn new(short_code: ShortCode, long_url: LongUrl, owner_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            id: ShortUrlId::new(),
            short_code,
            long_url,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Short URL unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortUrlId(pub Uuid);

impl ShortUrlId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a short URL ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ShortUrlIdError> {
        Uuid::parse_str(s)
            .map(ShortUrlId)
            .map_err(|e| ShortUrlIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ShortUrlId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShortUrlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public path segment that redirects to a long URL.
///
/// Restricted to ASCII letters, digits, `-` and `_` so it is always a single
/// path segment that needs no escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    const MAX_LENGTH: usize = 64;

    /// Create a new validated short code.
    ///
    /// # Errors
    /// * `Empty` - Code is empty
    /// * `TooLong` - Code exceeds 64 characters
    /// * `InvalidCharacter` - Code contains anything outside `[A-Za-z0-9_-]`
    pub fn new(code: String) -> Result<Self, ShortCodeError> {
        let length = code.chars().count();
        if length == 0 {
            return Err(ShortCodeError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(ShortCodeError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if let Some(c) = code
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ShortCodeError::InvalidCharacter(c));
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Redirect target. Must be an absolute `http` or `https` URL.
///
/// The string is kept as supplied so the redirect reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongUrl(String);

impl LongUrl {
    /// Create a new validated long URL.
    ///
    /// # Errors
    /// * `Malformed` - Not an absolute URL
    /// * `UnsupportedScheme` - Scheme is neither `http` nor `https`
    pub fn new(raw: String) -> Result<Self, LongUrlError> {
        let parsed =
            url::Url::parse(raw.trim()).map_err(|e| LongUrlError::Malformed(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(LongUrlError::UnsupportedScheme(other.to_string())),
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(LongUrlError::Malformed("missing host".to_string()));
        }

        Ok(Self(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LongUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a short URL.
#[derive(Debug)]
pub struct CreateShortUrlCommand {
    pub short_code: ShortCode,
    pub long_url: LongUrl,
}

/// Command to update a short URL.
///
/// All fields are optional to support partial updates.
#[derive(Debug, Default)]
pub struct UpdateShortUrlCommand {
    pub short_code: Option<ShortCode>,
    pub long_url: Option<LongUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_accepts_allowed_alphabet() {
        assert!(ShortCode::new("abc".to_string()).is_ok());
        assert!(ShortCode::new("A-b_9".to_string()).is_ok());
        assert!(ShortCode::new("x".repeat(64)).is_ok());
    }

    #[test]
    fn test_short_code_rejects_empty_and_long() {
        assert_eq!(ShortCode::new(String::new()), Err(ShortCodeError::Empty));
        assert_eq!(
            ShortCode::new("x".repeat(65)),
            Err(ShortCodeError::TooLong {
                max: 64,
                actual: 65
            })
        );
    }

    #[test]
    fn test_short_code_rejects_path_characters() {
        assert_eq!(
            ShortCode::new("a/b".to_string()),
            Err(ShortCodeError::InvalidCharacter('/'))
        );
        assert_eq!(
            ShortCode::new("has space".to_string()),
            Err(ShortCodeError::InvalidCharacter(' '))
        );
        assert!(ShortCode::new("café".to_string()).is_err());
    }

    #[test]
    fn test_long_url_accepts_http_and_https() {
        let url = LongUrl::new("https://example.com/some/path?q=1".to_string()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/some/path?q=1");
        assert!(LongUrl::new("http://localhost:8080".to_string()).is_ok());
    }

    #[test]
    fn test_long_url_rejects_other_schemes() {
        assert_eq!(
            LongUrl::new("ftp://example.com".to_string()),
            Err(LongUrlError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            LongUrl::new("javascript:alert(1)".to_string()),
            Err(LongUrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_long_url_rejects_relative() {
        assert!(matches!(
            LongUrl::new("/just/a/path".to_string()),
            Err(LongUrlError::Malformed(_))
        ));
        assert!(matches!(
            LongUrl::new("not a url".to_string()),
            Err(LongUrlError::Malformed(_))
        ));
    }

    #[test]
    fn test_short_url_id_from_string() {
        let id = ShortUrlId::new();
        assert_eq!(ShortUrlId::from_string(&id.to_string()).unwrap(), id);
        assert!(ShortUrlId::from_string("nope").is_err());
    }
}
