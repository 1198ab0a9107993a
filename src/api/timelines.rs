//! Timeline endpoints

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use super::dto::StatusResponse;
use crate::AppState;
use crate::data::PublicTimelineQuery;
use crate::error::AppError;
use crate::service::TimelineService;

/// Query string of `GET /v1/timelines/public`
#[derive(Debug, Default, Deserialize)]
pub struct PublicTimelineParams {
    pub only_media: Option<String>,
    pub max_id: Option<i64>,
    pub since_id: Option<i64>,
    pub limit: Option<i64>,
}

impl PublicTimelineParams {
    fn into_query(self) -> Result<PublicTimelineQuery, AppError> {
        let only_media = match self.only_media.as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "only_media must be a boolean, got {other:?}"
                )));
            }
        };

        let max_id = non_negative("max_id", self.max_id)?;
        let since_id = non_negative("since_id", self.since_id)?;

        Ok(PublicTimelineQuery::new(
            only_media,
            max_id,
            since_id,
            self.limit.unwrap_or(0),
        ))
    }
}

fn non_negative(name: &str, value: Option<i64>) -> Result<i64, AppError> {
    match value {
        Some(v) if v < 0 => Err(AppError::Validation(format!(
            "{name} must not be negative"
        ))),
        Some(v) => Ok(v),
        None => Ok(0),
    }
}

/// GET /v1/timelines/public
///
/// Statuses from every account, newest first. Public.
pub async fn public_timeline(
    State(state): State<AppState>,
    params: Result<Query<PublicTimelineParams>, QueryRejection>,
) -> Result<Json<Vec<StatusResponse>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = params.into_query()?;

    let service = TimelineService::new(state.repos.timelines.clone());
    let statuses = service.public_timeline(query).await?;

    Ok(Json(statuses.into_iter().map(Into::into).collect()))
}
