//! Repository interfaces
//!
//! Handlers and services only see these traits. Two implementations exist:
//! the SQLite store in [`super::database`] and the in-memory store in
//! [`super::memory`].

use async_trait::async_trait;

use super::error::StoreResult;
use super::models::{Account, NewAccount, NewStatus, Status, StatusId};
use super::timeline::PublicTimelineQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Exact-match lookup; `Ok(None)` when no account has that username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>>;

    /// Insert an account and return it with identity populated
    ///
    /// Duplicate usernames are rejected by the store, not checked up front.
    async fn add(&self, account: NewAccount) -> StoreResult<Account>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Fetch a status joined with its author; `Ok(None)` when absent
    async fn find_with_account_by_id(&self, id: StatusId) -> StoreResult<Option<Status>>;

    /// Insert a status and return it with identity, timestamp and author
    async fn add(&self, status: NewStatus) -> StoreResult<Status>;

    /// Delete by id with no ownership predicate
    ///
    /// Returns `StoreError::NotFound` when nothing was deleted. Callers must
    /// authorize against `find_with_account_by_id` first.
    async fn delete_by_id(&self, id: StatusId) -> StoreResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// One page of the public timeline, newest first, authors joined
    async fn find_public(&self, query: PublicTimelineQuery) -> StoreResult<Vec<Status>>;
}
