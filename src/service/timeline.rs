//! Timeline service
//!
//! Handles public timeline retrieval.

use std::sync::Arc;

use crate::data::{PublicTimelineQuery, Status, TimelineRepository};
use crate::error::AppError;

/// Timeline service
pub struct TimelineService {
    timelines: Arc<dyn TimelineRepository>,
}

impl TimelineService {
    /// Create new timeline service
    pub fn new(timelines: Arc<dyn TimelineRepository>) -> Self {
        Self { timelines }
    }

    /// Get public timeline
    ///
    /// Returns statuses from every account, newest first.
    ///
    /// # Arguments
    /// * `query` - Cursor bounds and page size; the limit is clamped, never rejected
    pub async fn public_timeline(
        &self,
        query: PublicTimelineQuery,
    ) -> Result<Vec<Status>, AppError> {
        let statuses = self.timelines.find_public(query).await?;

        tracing::debug!(
            max_id = query.max_id,
            since_id = query.since_id,
            limit = query.limit,
            returned = statuses.len(),
            "Public timeline served"
        );

        Ok(statuses)
    }
}
