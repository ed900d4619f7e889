pub mod account;
pub mod memory;
pub mod refresh_token;
pub mod short_url;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryStore;
pub use refresh_token::PostgresRefreshTokenLedger;
pub use short_url::PostgresShortUrlRepository;
