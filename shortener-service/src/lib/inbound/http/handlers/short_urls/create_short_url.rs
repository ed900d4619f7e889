use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ShortUrlResponseData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::short_url::errors::ShortUrlError;
use crate::short_url::models::CreateShortUrlCommand;
use crate::short_url::models::LongUrl;
use crate::short_url::models::ShortCode;

pub async fn create_short_url(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    body: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<ApiSuccess<ShortUrlResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .short_url_service
        .create_short_url(&caller.account_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref short_url| ApiSuccess::new(StatusCode::CREATED, short_url.into()))
}

/// HTTP request body for creating a short URL (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShortUrlRequest {
    #[serde(default)]
    short_url: String,
    #[serde(default)]
    long_url: String,
}

impl CreateShortUrlRequest {
    fn try_into_command(self) -> Result<CreateShortUrlCommand, ShortUrlError> {
        Ok(CreateShortUrlCommand {
            short_code: ShortCode::new(self.short_url)?,
            long_url: LongUrl::new(self.long_url)?,
        })
    }
}
