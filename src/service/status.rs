//! Status service
//!
//! Handles status (post) operations: create, fetch, delete.

use std::sync::Arc;

use crate::data::{Account, NewStatus, Status, StatusId, StatusRepository, StoreError};
use crate::error::AppError;

/// Status service
pub struct StatusService {
    statuses: Arc<dyn StatusRepository>,
}

impl StatusService {
    /// Create new status service
    pub fn new(statuses: Arc<dyn StatusRepository>) -> Self {
        Self { statuses }
    }

    /// Post a new status as `author`
    ///
    /// # Returns
    /// The stored status with its author joined
    pub async fn post(&self, author: &Account, content: String) -> Result<Status, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("status is required".to_string()));
        }

        let status = self
            .statuses
            .add(NewStatus::new(author.id, content))
            .await?;

        tracing::info!(status_id = status.id, account_id = author.id, "Status created");
        crate::metrics::STATUSES_CREATED_TOTAL.inc();

        Ok(status)
    }

    /// Get a status with its author
    ///
    /// # Errors
    /// `NotFound` if no status has that id
    pub async fn get(&self, id: StatusId) -> Result<Status, AppError> {
        self.statuses
            .find_with_account_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Delete a status on behalf of `actor`
    ///
    /// Fetches the status, checks that `actor` wrote it, then deletes by id.
    /// The fetch and the delete are separate store calls, so a concurrent
    /// delete in between surfaces here as `NotFound`.
    ///
    /// # Errors
    /// - `NotFound` if the status does not exist (or vanished before delete)
    /// - `Forbidden` if `actor` is not the author; nothing is deleted
    pub async fn delete(&self, actor: &Account, id: StatusId) -> Result<Status, AppError> {
        let status = self.get(id).await?;

        if status.account.id != actor.id {
            tracing::warn!(
                status_id = id,
                author_id = status.account.id,
                actor_id = actor.id,
                "Rejected delete of another account's status"
            );
            return Err(AppError::Forbidden);
        }

        match self.statuses.delete_by_id(id).await {
            Ok(()) => {}
            Err(StoreError::NotFound) => {
                tracing::debug!(status_id = id, "Status disappeared before delete");
                return Err(AppError::NotFound);
            }
            Err(error) => return Err(error.into()),
        }

        tracing::info!(status_id = id, account_id = actor.id, "Status deleted");
        crate::metrics::STATUSES_DELETED_TOTAL.inc();

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AccountRepository, MemoryStore, MockStatusRepository, NewAccount};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn account(id: i64, username: &str) -> Account {
        Account {
            id,
            username: username.to_string(),
            password_hash: String::new(),
            display_name: None,
            note: None,
            avatar: None,
            header: None,
            created_at: Utc::now(),
        }
    }

    fn status_by(author: Account, id: StatusId) -> Status {
        Status {
            id,
            account: author,
            content: "hello".to_string(),
            created_at: Utc::now(),
        }
    }

    async fn memory_service() -> (StatusService, Account, Account) {
        let store = Arc::new(MemoryStore::new());
        let john = AccountRepository::add(store.as_ref(), NewAccount::new("john", "x"))
            .await
            .unwrap();
        let jane = AccountRepository::add(store.as_ref(), NewAccount::new("jane", "x"))
            .await
            .unwrap();
        (StatusService::new(store), john, jane)
    }

    #[tokio::test]
    async fn post_then_get() {
        let (service, john, _) = memory_service().await;

        let posted = service.post(&john, "hello".to_string()).await.unwrap();
        assert!(posted.id > 0);

        let fetched = service.get(posted.id).await.unwrap();
        assert_eq!(fetched.content, "hello");
        assert_eq!(fetched.account.id, john.id);
    }

    #[tokio::test]
    async fn post_rejects_blank_content() {
        let (service, john, _) = memory_service().await;
        assert!(matches!(
            service.post(&john, "   ".to_string()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn author_can_delete() {
        let (service, john, _) = memory_service().await;
        let posted = service.post(&john, "bye".to_string()).await.unwrap();

        let deleted = service.delete(&john, posted.id).await.unwrap();
        assert_eq!(deleted.id, posted.id);
        assert!(matches!(service.get(posted.id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn other_account_cannot_delete() {
        let (service, john, jane) = memory_service().await;
        let posted = service.post(&john, "mine".to_string()).await.unwrap();

        assert!(matches!(
            service.delete(&jane, posted.id).await,
            Err(AppError::Forbidden)
        ));
        assert!(service.get(posted.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_status_is_not_found() {
        let (service, john, _) = memory_service().await;
        assert!(matches!(
            service.delete(&john, 999_999).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn forbidden_delete_never_reaches_store() {
        let author = account(1, "john");
        let intruder = account(2, "jane");

        let mut statuses = MockStatusRepository::new();
        let found = status_by(author, 10);
        statuses
            .expect_find_with_account_by_id()
            .with(eq(10))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        statuses.expect_delete_by_id().never();

        let service = StatusService::new(Arc::new(statuses));
        assert!(matches!(
            service.delete(&intruder, 10).await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn delete_lost_race_is_not_found() {
        let author = account(1, "john");

        let mut statuses = MockStatusRepository::new();
        let found = status_by(author.clone(), 10);
        statuses
            .expect_find_with_account_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        statuses
            .expect_delete_by_id()
            .with(eq(10))
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = StatusService::new(Arc::new(statuses));
        assert!(matches!(
            service.delete(&author, 10).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_store_failure_is_not_masked() {
        let author = account(1, "john");

        let mut statuses = MockStatusRepository::new();
        let found = status_by(author.clone(), 10);
        statuses
            .expect_find_with_account_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        statuses
            .expect_delete_by_id()
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolClosed)));

        let service = StatusService::new(Arc::new(statuses));
        assert!(matches!(
            service.delete(&author, 10).await,
            Err(AppError::Database(_))
        ));
    }
}
