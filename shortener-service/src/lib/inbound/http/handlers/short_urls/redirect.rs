use axum::extract::Path;
use axum::extract::State;
use axum::response::Redirect;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::short_url::models::ShortCode;

/// Public entry point: `GET /:short_url` answers 307 with the long URL.
///
/// A path that can never be a short code is reported as unknown.
pub async fn redirect(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> Result<Redirect, ApiError> {
    let short_code = ShortCode::new(short_url)
        .map_err(|_| ApiError::NotFound("Short URL not found".to_string()))?;

    let short_url = state
        .short_url_service
        .resolve(&short_code)
        .await
        .map_err(ApiError::from)?;

    tracing::debug!(short_code = %short_code, "Redirecting");

    Ok(Redirect::temporary(short_url.long_url.as_str()))
}
