use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;
    let (email, password) = body.try_into_parts()?;

    state
        .auth_service
        .register(email, &password)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    fn try_into_parts(self) -> Result<(EmailAddress, String), ApiError> {
        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::BadRequest(format!("Invalid email: {}", e)))?;

        if self.password.is_empty() {
            return Err(ApiError::BadRequest("Password is required".to_string()));
        }

        Ok((email, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub email: String,
}

impl From<&Account> for RegisterResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.to_string(),
        }
    }
}
