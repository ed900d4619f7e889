use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ShortUrlResponseData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::short_url::models::ShortUrlId;

pub async fn get_short_url(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(short_url_id): Path<String>,
) -> Result<ApiSuccess<ShortUrlResponseData>, ApiError> {
    let short_url_id =
        ShortUrlId::from_string(&short_url_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .short_url_service
        .get_short_url(&caller.account_id, &short_url_id)
        .await
        .map_err(ApiError::from)
        .map(|ref short_url| ApiSuccess::new(StatusCode::OK, short_url.into()))
}
