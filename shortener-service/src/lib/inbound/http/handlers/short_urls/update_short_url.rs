use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
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
use crate::short_url::models::LongUrl;
use crate::short_url::models::ShortCode;
use crate::short_url::models::ShortUrlId;
use crate::short_url::models::UpdateShortUrlCommand;

/// HTTP request body for updating a short URL (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateShortUrlRequest {
    pub short_url: Option<String>,
    pub long_url: Option<String>,
}

impl UpdateShortUrlRequest {
    fn try_into_command(self) -> Result<UpdateShortUrlCommand, ShortUrlError> {
        Ok(UpdateShortUrlCommand {
            short_code: self.short_url.map(ShortCode::new).transpose()?,
            long_url: self.long_url.map(LongUrl::new).transpose()?,
        })
    }
}

pub async fn update_short_url(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(short_url_id): Path<String>,
    body: Result<Json<UpdateShortUrlRequest>, JsonRejection>,
) -> Result<ApiSuccess<ShortUrlResponseData>, ApiError> {
    let short_url_id = ShortUrlId::from_string(&short_url_id).map_err(ShortUrlError::from)?;
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .short_url_service
        .update_short_url(&caller.account_id, &short_url_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref short_url| ApiSuccess::new(StatusCode::OK, short_url.into()))
}
