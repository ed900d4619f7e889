use std::env;

use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Shortest signing secret accepted for HMAC access tokens.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 24 * 60;

/// Longest accepted refresh token lifetime (one year).
pub const MAX_REFRESH_TOKEN_TTL_HOURS: i64 = 365 * 24;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration, fixed for the lifetime of the process.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_hours: i64,
}

impl JwtConfig {
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_ttl_minutes)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.refresh_token_ttl_hours)
    }
}

// Hand-written so the secret never ends up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_token_ttl_hours", &self.refresh_token_ttl_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Config = builder
            .set_default("server.http_port", 3000)?
            .set_default("jwt.access_token_ttl_minutes", 15)?
            .set_default("jwt.refresh_token_ttl_hours", 24)?
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_JWT_SECRET_BYTES
            )));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.jwt.access_token_ttl_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_minutes must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_MINUTES
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_HOURS).contains(&self.jwt.refresh_token_ttl_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_token_ttl_hours must be between 1 and {}",
                MAX_REFRESH_TOKEN_TTL_HOURS
            )));
        }
        Ok(())
    }
}
