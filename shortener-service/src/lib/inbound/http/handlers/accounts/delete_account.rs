use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_account(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(account_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let account_id = AccountId::from_string(&account_id).map_err(AccountError::from)?;

    state
        .account_service
        .delete_account(&caller.account_id, &account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
