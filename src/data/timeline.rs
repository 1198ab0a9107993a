//! Public timeline query engine
//!
//! A [`PublicTimelineQuery`] is turned into a [`TimelineFilter`]: a conjunction
//! of typed [`Criterion`] values plus a clamped row limit. Only bounds that are
//! actually supplied contribute a criterion. The same filter drives both the
//! SQL store (bound predicates on a `QueryBuilder`) and the in-memory store.

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

use super::models::{Status, StatusId};

/// Rows returned when the requested limit is out of range
pub const DEFAULT_LIMIT: i64 = 40;

/// Hard ceiling on rows per page
pub const MAX_LIMIT: i64 = 80;

/// Parameters of the public timeline
///
/// `max_id` and `since_id` of 0 mean "unbounded on that side".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PublicTimelineQuery {
    /// Reserved; no media relation exists, so this never filters
    #[serde(default)]
    pub only_media: bool,
    #[serde(default)]
    pub max_id: i64,
    #[serde(default)]
    pub since_id: i64,
    #[serde(default)]
    pub limit: i64,
}

impl PublicTimelineQuery {
    pub fn new(only_media: bool, max_id: i64, since_id: i64, limit: i64) -> Self {
        Self {
            only_media,
            max_id,
            since_id,
            limit,
        }
    }
}

/// Clamp a requested page size into `[1, MAX_LIMIT]`
///
/// Out-of-range requests fall back to [`DEFAULT_LIMIT`] instead of saturating.
pub fn clamp_limit(limit: i64) -> i64 {
    if (1..=MAX_LIMIT).contains(&limit) {
        limit
    } else {
        DEFAULT_LIMIT
    }
}

/// One conjunct of the timeline filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// `status.id <= max_id`
    MaxId(StatusId),
    /// `status.id >= since_id`
    SinceId(StatusId),
}

impl Criterion {
    /// Whether an in-memory status satisfies this criterion
    pub fn matches(&self, status: &Status) -> bool {
        match *self {
            Criterion::MaxId(max_id) => status.id <= max_id,
            Criterion::SinceId(since_id) => status.id >= since_id,
        }
    }

    /// Append this criterion as a bound predicate
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match *self {
            Criterion::MaxId(max_id) => {
                builder.push("s.id <= ").push_bind(max_id);
            }
            Criterion::SinceId(since_id) => {
                builder.push("s.id >= ").push_bind(since_id);
            }
        }
    }
}

/// Conjunctive filter plus page size for one timeline request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineFilter {
    criteria: Vec<Criterion>,
    limit: i64,
}

impl TimelineFilter {
    pub fn from_query(query: &PublicTimelineQuery) -> Self {
        let mut criteria = Vec::with_capacity(2);

        // only_media has no backing relation and adds nothing.

        if query.max_id > 0 {
            criteria.push(Criterion::MaxId(query.max_id));
        }
        if query.since_id > 0 {
            criteria.push(Criterion::SinceId(query.since_id));
        }

        Self {
            criteria,
            limit: clamp_limit(query.limit),
        }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Whether a status passes every criterion
    pub fn matches(&self, status: &Status) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(status))
    }

    /// Append ` WHERE a AND b` when at least one criterion is present
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        for (index, criterion) in self.criteria.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            criterion.push_sql(builder);
        }
    }

    /// Sort newest first and cut to the page size
    ///
    /// `id` breaks ties between equal timestamps.
    pub fn apply_order_and_limit(&self, statuses: &mut Vec<Status>) {
        statuses.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        statuses.truncate(self.limit as usize);
    }
}
