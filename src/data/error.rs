//! Repository error taxonomy
//!
//! Absence on lookups is `Ok(None)`, not an error. `NotFound` is reserved for
//! mutations that matched nothing.

use thiserror::Error;

use super::models::AccountId;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A delete affected zero rows
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    /// A status referenced an account that does not exist
    #[error("account {0} does not exist")]
    MissingAccount(AccountId),

    /// Any other store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify an account insert failure
    pub(crate) fn from_account_insert(error: sqlx::Error, username: &str) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Conflict(format!("username {username:?} is already taken"))
            }
            _ => StoreError::Database(error),
        }
    }

    /// Classify a status insert failure
    pub(crate) fn from_status_insert(error: sqlx::Error, account_id: AccountId) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                StoreError::MissingAccount(account_id)
            }
            _ => StoreError::Database(error),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
