pub mod accounts;
pub mod authentication;
pub mod short_urls;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::authentication::errors::AuthError;
use crate::short_url::errors::ShortUrlError;
use crate::short_url::models::ShortUrl;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Successful response: status code plus the bare JSON payload.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

/// Error payload: `{"status_code": u16, "message": String}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::InvalidToken | AuthError::ExpiredToken => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::EmailInUse(_) => ApiError::Conflict("Email already in use".to_string()),
            AuthError::InvalidEmail(_) => ApiError::BadRequest(err.to_string()),
            AuthError::HashingFailure(_)
            | AuthError::SigningFailure(_)
            | AuthError::StoreFailure(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) => {
                ApiError::Conflict("Email already in use".to_string())
            }
            AccountError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            AccountError::InvalidAccountId(_) | AccountError::InvalidEmail(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::Password(_) | AccountError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ShortUrlError> for ApiError {
    fn from(err: ShortUrlError) -> Self {
        match err {
            ShortUrlError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ShortUrlError::ShortCodeAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            ShortUrlError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            ShortUrlError::InvalidId(_)
            | ShortUrlError::InvalidShortCode(_)
            | ShortUrlError::InvalidLongUrl(_) => ApiError::BadRequest(err.to_string()),
            ShortUrlError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortUrlResponseData {
    pub id: String,
    pub short_url: String,
    pub long_url: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ShortUrl> for ShortUrlResponseData {
    fn from(short_url: &ShortUrl) -> Self {
        Self {
            id: short_url.id.to_string(),
            short_url: short_url.short_code.to_string(),
            long_url: short_url.long_url.to_string(),
            user_id: short_url.owner_id.to_string(),
            created_at: short_url.created_at,
            updated_at: short_url.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_never_reveal_which_check_failed() {
        assert_eq!(
            ApiError::from(AuthError::InvalidToken),
            ApiError::from(AuthError::ExpiredToken)
        );
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let response =
            ApiError::from(AuthError::StoreFailure("connection refused".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_error_status_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::EmailInUse("a@x.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::Forbidden("id".to_string())),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(ShortUrlError::ShortCodeAlreadyExists("x".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(ShortUrlError::NotFound("x".to_string())),
            ApiError::NotFound(_)
        ));
    }
}
