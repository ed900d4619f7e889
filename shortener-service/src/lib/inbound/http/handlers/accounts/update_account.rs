use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::UpdateAccountCommand;
use crate::inbound::http::handlers::AccountResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an account (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, ApiError> {
        let email = self
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(AccountError::from)?;

        if self.password.as_deref() == Some("") {
            return Err(ApiError::BadRequest("Password must not be empty".to_string()));
        }

        Ok(UpdateAccountCommand {
            email,
            password: self.password,
        })
    }
}

pub async fn update_account(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(account_id): Path<String>,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    let account_id = AccountId::from_string(&account_id).map_err(AccountError::from)?;
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .account_service
        .update_account(&caller.account_id, &account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
