use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::account::models::AccountId;
use crate::inbound::http::handlers::AccountResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    let account_id =
        AccountId::from_string(&account_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .account_service
        .get_account(&caller.account_id, &account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
