use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ShortUrlResponseData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn list_short_urls(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
) -> Result<ApiSuccess<Vec<ShortUrlResponseData>>, ApiError> {
    state
        .short_url_service
        .list_short_urls(&caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|short_urls| {
            ApiSuccess::new(
                StatusCode::OK,
                short_urls.iter().map(ShortUrlResponseData::from).collect(),
            )
        })
}
