//! Account service
//!
//! Handles registration and lookup of accounts.

use std::sync::Arc;

use crate::auth::hash_password;
use crate::data::{Account, AccountRepository, NewAccount};
use crate::error::AppError;

/// Registration input, already decoded from the request
#[derive(Debug, Clone, Default)]
pub struct RegisterAccount {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
    pub avatar: Option<String>,
    pub header: Option<String>,
}

/// Account service
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
}

impl AccountService {
    /// Create new account service
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Register a new account
    ///
    /// # Errors
    /// - `Validation` if username or password is empty
    /// - `Conflict` if the username is taken
    pub async fn register(&self, input: RegisterAccount) -> Result<Account, AppError> {
        if input.username.trim().is_empty() {
            return Err(AppError::Validation("username is required".to_string()));
        }
        if input.password.is_empty() {
            return Err(AppError::Validation("password is required".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let new_account = NewAccount::new(input.username, password_hash)
            .with_display_name(input.display_name)
            .with_note(input.note)
            .with_avatar(input.avatar)
            .with_header(input.header);

        let account = self.accounts.add(new_account).await?;

        tracing::info!(account_id = account.id, username = %account.username, "Account created");
        crate::metrics::ACCOUNTS_CREATED_TOTAL.inc();

        Ok(account)
    }

    /// Get an account by username
    ///
    /// # Errors
    /// `NotFound` if no account has that username
    pub async fn get_by_username(&self, username: &str) -> Result<Account, AppError> {
        self.accounts
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MemoryStore, MockAccountRepository, StoreError};

    fn service() -> AccountService {
        AccountService::new(Arc::new(MemoryStore::new()))
    }

    fn john() -> RegisterAccount {
        RegisterAccount {
            username: "john".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn register_hashes_password() {
        let service = service();
        let account = service.register(john()).await.unwrap();

        assert!(account.id > 0);
        assert_ne!(account.password_hash, "secret");
        assert!(account.check_password("secret"));
        assert!(!account.check_password("wrong"));
    }

    #[tokio::test]
    async fn register_then_lookup() {
        let service = service();
        let registered = service.register(john()).await.unwrap();

        let found = service.get_by_username("john").await.unwrap();
        assert_eq!(found.id, registered.id);
        assert_eq!(found.username, "john");
    }

    #[tokio::test]
    async fn register_rejects_duplicates() {
        let service = service();
        service.register(john()).await.unwrap();

        let error = service.register(john()).await.unwrap_err();
        assert!(matches!(error, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_requires_username_and_password() {
        let service = service();

        let mut input = john();
        input.username = "  ".to_string();
        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));

        let mut input = john();
        input.password.clear();
        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        assert!(matches!(
            service().get_by_username("nobody").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_username()
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolClosed)));

        let service = AccountService::new(Arc::new(accounts));
        assert!(matches!(
            service.get_by_username("john").await,
            Err(AppError::Database(_))
        ));
    }
}
