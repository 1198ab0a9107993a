//! Account endpoints

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use super::dto::{AccountResponse, CreateAccountRequest};
use crate::AppState;
use crate::error::AppError;
use crate::service::AccountService;

/// POST /v1/accounts
///
/// Register a new account. No authentication required.
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let service = AccountService::new(state.repos.accounts.clone());
    let account = service.register(req.into()).await?;

    Ok(Json(account.into()))
}

/// GET /v1/accounts/:username
pub async fn get_account(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    let service = AccountService::new(state.repos.accounts.clone());
    let account = service.get_by_username(&username).await?;

    Ok(Json(account.into()))
}
