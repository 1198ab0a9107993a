//! In-memory store
//!
//! Volatile implementation of the repository traits, used for tests and for
//! `database.backend = "memory"`. Enforces the same constraints as the SQL
//! schema: unique usernames and existing authors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::error::{StoreError, StoreResult};
use super::models::*;
use super::repository::{AccountRepository, StatusRepository, TimelineRepository};
use super::timeline::{PublicTimelineQuery, TimelineFilter};

/// A status row; only the author id is kept, like the `status` table
#[derive(Debug)]
struct StoredStatus {
    id: StatusId,
    account_id: AccountId,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    statuses: Vec<StoredStatus>,
    next_account_id: AccountId,
    next_status_id: StatusId,
}

impl State {
    fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    fn joined(&self) -> impl Iterator<Item = Status> + '_ {
        self.statuses
            .iter()
            .filter_map(|stored| {
                self.account(stored.account_id).map(|account| Status {
                    id: stored.id,
                    account: account.clone(),
                    content: stored.content.clone(),
                    created_at: stored.created_at,
                })
            })
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .iter()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn add(&self, account: NewAccount) -> StoreResult<Account> {
        let mut state = self.state.write().await;

        if state.accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::Conflict(format!(
                "username {:?} is already taken",
                account.username
            )));
        }

        state.next_account_id += 1;
        let account = account.into_account(state.next_account_id, Utc::now());
        state.accounts.push(account.clone());

        Ok(account)
    }
}

#[async_trait]
impl StatusRepository for MemoryStore {
    async fn find_with_account_by_id(&self, id: StatusId) -> StoreResult<Option<Status>> {
        let state = self.state.read().await;
        Ok(state.joined().find(|status| status.id == id))
    }

    async fn add(&self, status: NewStatus) -> StoreResult<Status> {
        let mut state = self.state.write().await;

        let Some(account) = state.account(status.account_id).cloned() else {
            return Err(StoreError::MissingAccount(status.account_id));
        };

        state.next_status_id += 1;
        let id = state.next_status_id;
        let created_at = Utc::now();
        state.statuses.push(StoredStatus {
            id,
            account_id: account.id,
            content: status.content.clone(),
            created_at,
        });

        Ok(Status {
            id,
            account,
            content: status.content,
            created_at,
        })
    }

    async fn delete_by_id(&self, id: StatusId) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let before = state.statuses.len();
        state.statuses.retain(|stored| stored.id != id);

        if state.statuses.len() == before {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl TimelineRepository for MemoryStore {
    async fn find_public(&self, query: PublicTimelineQuery) -> StoreResult<Vec<Status>> {
        let filter = TimelineFilter::from_query(&query);
        let state = self.state.read().await;

        let mut statuses: Vec<Status> = state
            .joined()
            .filter(|status| filter.matches(status))
            .collect();
        filter.apply_order_and_limit(&mut statuses);

        Ok(statuses)
    }
}
