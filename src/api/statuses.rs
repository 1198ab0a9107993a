//! Status endpoints

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use super::dto::{CreateStatusRequest, StatusResponse};
use crate::AppState;
use crate::auth::CurrentAccount;
use crate::data::StatusId;
use crate::error::AppError;
use crate::service::StatusService;

fn parse_status_id(raw: &str) -> Result<StatusId, AppError> {
    raw.parse::<StatusId>()
        .map_err(|_| AppError::Validation(format!("invalid status id: {raw}")))
}

/// POST /v1/statuses
///
/// Post a status as the authenticated account.
pub async fn create_status(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    payload: Result<Json<CreateStatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    if req.media_ids.as_ref().is_some_and(|ids| !ids.is_empty()) {
        tracing::debug!(account_id = account.id, "Ignoring media_ids on status");
    }

    let service = StatusService::new(state.repos.statuses.clone());
    let status = service.post(&account, req.status).await?;

    Ok(Json(status.into()))
}

/// GET /v1/statuses/:id
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_status_id(&id)?;

    let service = StatusService::new(state.repos.statuses.clone());
    let status = service.get(id).await?;

    Ok(Json(status.into()))
}

/// DELETE /v1/statuses/:id
///
/// Only the author may delete a status. Responds with an empty object.
pub async fn delete_status(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_status_id(&id)?;

    let service = StatusService::new(state.repos.statuses.clone());
    service.delete(&account, id).await?;

    Ok(Json(serde_json::json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_id_must_be_numeric() {
        assert_eq!(parse_status_id("42").unwrap(), 42);
        assert!(matches!(parse_status_id("abc"), Err(AppError::Validation(_))));
        assert!(matches!(parse_status_id(""), Err(AppError::Validation(_))));
    }
}
