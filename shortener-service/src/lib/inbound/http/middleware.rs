use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::models::AccountId;
use crate::authentication::errors::AuthError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const UNAUTHORIZED_MESSAGE: &str = "Invalid or expired token";

/// Identity of the caller, inserted into request extensions by
/// [`authenticate`] and read back by handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
    }
}

/// Middleware that validates the bearer access token and attaches the
/// caller's identity. Every failure ends the request with 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(req.headers()).map_err(IntoResponse::into_response)?;

    let claims = state.auth_service.validate_token(token).map_err(|e| {
        match e {
            AuthError::ExpiredToken => tracing::warn!("Rejected expired access token"),
            _ => tracing::warn!(error = %e, "Rejected invalid access token"),
        }
        unauthorized().into_response()
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Access token subject is not an account id");
        unauthorized().into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        account_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The header must split on spaces into exactly two parts with the first
/// being `Bearer`.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("Missing Authorization header");
        unauthorized()
    })?;

    let value = value.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid UTF-8");
        unauthorized()
    })?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => {
            tracing::warn!("Malformed Authorization header");
            Err(unauthorized())
        }
    }
}
