use std::sync::Arc;

use auth::Authenticator;
use shortener_service::account::service::AccountService;
use shortener_service::authentication::service::AuthService;
use shortener_service::config::Config;
use shortener_service::inbound::http::router::create_router;
use shortener_service::repositories::PostgresAccountRepository;
use shortener_service::repositories::PostgresRefreshTokenLedger;
use shortener_service::repositories::PostgresShortUrlRepository;
use shortener_service::short_url::service::ShortUrlService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shortener_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shortener-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_hours = config.jwt.refresh_token_ttl_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_DB_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_token_ttl(),
    ));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let refresh_token_ledger = Arc::new(PostgresRefreshTokenLedger::new(pg_pool.clone()));
    let short_url_repository = Arc::new(PostgresShortUrlRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&account_repository),
        refresh_token_ledger,
        authenticator,
        config.jwt.refresh_token_ttl(),
    ));
    let account_service = Arc::new(AccountService::new(account_repository));
    let short_url_service = Arc::new(ShortUrlService::new(short_url_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, account_service, short_url_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
